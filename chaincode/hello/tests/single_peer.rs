// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the Hello chaincode.

use chaincode_shim::{
    test::MockStub, Chaincode as _, ChaincodeLogger, Invocation, LogLevel, TransactionStub,
    WorldState,
};
use futures::FutureExt as _;
use hello::{HelloChaincode, GREETED_EVENT, GREETING_KEY};

/// Initializes with a greeting, then greets someone by name.
#[test]
fn init_then_hello() {
    let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();

    let init = stub.mock_init("tx-1", Invocation::new("init", ["Hi"]));
    assert!(init.is_success());
    assert_eq!(stub.state(GREETING_KEY), Some(&b"Hi"[..]));

    let response = stub.mock_invoke("tx-2", Invocation::new("hello", ["Ann"]));

    assert!(response.is_success());
    assert_eq!(response.payload, b"Hi Ann!");
    let event = stub.last_event().expect("hello should emit an event");
    assert_eq!(event.name, GREETED_EVENT);
    assert_eq!(event.payload, b"Ann");
}

/// Greets a stranger with the default greeting when nothing was initialized.
#[test]
fn hello_without_init_or_name() {
    let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();

    let response = stub.mock_invoke("tx-1", Invocation::new("hello", Vec::<&str>::new()));

    assert_eq!(response.payload, b"Hello Stranger!");
    assert_eq!(
        stub.last_event().map(|event| event.payload.as_slice()),
        Some(&b"Stranger"[..])
    );
}

/// Unknown functions succeed with a fixed payload and emit nothing.
#[test]
fn unsupported_operation_is_a_success() {
    let (mut stub, sink) = MockStub::<HelloChaincode>::with_recording_logger();

    let response = stub.mock_invoke("tx-1", Invocation::new("goodbye", ["Ann"]));

    assert!(response.is_success());
    assert_eq!(response.payload, b"Unsupported operation");
    assert!(stub.events().is_empty());
    assert!(sink.messages_at(LogLevel::Critical).is_empty());
}

/// Init logs the greeting it stores.
#[test]
fn init_logs_greeting() {
    let (mut stub, sink) = MockStub::<HelloChaincode>::with_recording_logger();

    stub.mock_init("tx-1", Invocation::new("init", ["Hi"]));

    assert_eq!(
        sink.messages_at(LogLevel::Info),
        vec!["Init".to_owned(), "Setting greeting: 'Hi'".to_owned()]
    );
}

/// A second init replaces the greeting.
#[test]
fn reinit_replaces_greeting() {
    let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();

    stub.mock_init("tx-1", Invocation::new("init", ["Hi"]));
    stub.mock_init("tx-2", Invocation::new("init", ["Howdy"]));
    let response = stub.mock_invoke("tx-3", Invocation::new("hello", ["Ann"]));

    assert_eq!(response.payload, b"Howdy Ann!");
}

/// Invocations only depend on their arguments and the committed state.
#[test]
fn concurrent_invocations_see_the_same_state() {
    let chaincode = HelloChaincode::load(ChaincodeLogger::new("hello"));
    let mut state = WorldState::default();
    let mut init = TransactionStub::new(&state, Invocation::new("init", ["Hey"]), "tx-0", "ch");
    chaincode
        .init(&mut init)
        .now_or_never()
        .expect("init should not await anything");
    let effects = init.into_effects();
    state.commit(effects.writes);

    let names = ["Ann", "Bob", "Eve", "Joe"];
    let payloads = std::thread::scope(|scope| {
        let handles = names
            .iter()
            .map(|name| {
                let (chaincode, state) = (&chaincode, &state);
                scope.spawn(move || {
                    let mut stub = TransactionStub::new(
                        state,
                        Invocation::new("hello", [*name]),
                        format!("tx-{name}"),
                        "ch",
                    );
                    chaincode
                        .invoke(&mut stub)
                        .now_or_never()
                        .expect("invoke should not await anything")
                        .payload
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("invocation thread should not panic"))
            .collect::<Vec<_>>()
    });

    for (name, payload) in names.iter().zip(payloads) {
        assert_eq!(payload, format!("Hey {name}!").into_bytes());
    }
}

/// Queries answer like invocations but leave no event behind.
#[test]
fn query_emits_nothing() {
    let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();
    stub.mock_init("tx-1", Invocation::new("init", ["Hi"]));

    let response = stub.mock_query(Invocation::new("hello", ["Ann"]));

    assert_eq!(response.payload, b"Hi Ann!");
    assert!(stub.events().is_empty());
}
