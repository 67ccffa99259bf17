// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! Chaincode greeting its callers.

The greeting is set when the chaincode is instantiated and stored in world state under
[`GREETING_KEY`]. Every greeting emits a [`GREETED_EVENT`] event carrying the name of the
person greeted. */

use chaincode_shim::{info, warning, Chaincode, ChaincodeLogger, ChaincodeStub, Response};

/// The world state key holding the greeting.
pub const GREETING_KEY: &str = "greeting";
/// The name of the event emitted by `hello`.
pub const GREETED_EVENT: &str = "greeted";

const DEFAULT_GREETING: &[u8] = b"Hello";
const DEFAULT_NAME: &str = "Stranger";

pub struct HelloChaincode {
    logger: ChaincodeLogger,
}

impl Chaincode for HelloChaincode {
    const NAME: &'static str = "hello";

    fn load(logger: ChaincodeLogger) -> Self {
        HelloChaincode { logger }
    }

    async fn init(&self, stub: &mut impl ChaincodeStub) -> Response {
        info!(self.logger, "Init");
        let (_, parameters) = stub.function_and_parameters();

        if let Some(greeting) = parameters.into_iter().next() {
            info!(self.logger, "Setting greeting: '{greeting}'");
            if let Err(error) = stub.put_state(GREETING_KEY, greeting.into_bytes()) {
                warning!(self.logger, "Failed to store greeting: {error}");
            }
        }

        Response::success(Vec::new())
    }

    async fn invoke(&self, stub: &mut impl ChaincodeStub) -> Response {
        let (function, parameters) = stub.function_and_parameters();
        info!(self.logger, "- Invoke: {function}");

        match function.as_str() {
            "hello" => {
                let name = parameters.first().map_or(DEFAULT_NAME, String::as_str);
                Response::success(self.hello(stub, name))
            }
            // Unknown functions succeed with a fixed payload, unlike in `add`.
            _ => Response::success("Unsupported operation"),
        }
    }
}

impl HelloChaincode {
    fn hello(&self, stub: &mut impl ChaincodeStub, name: &str) -> String {
        let greeting = match stub.get_state(GREETING_KEY) {
            Ok(Some(greeting)) => greeting,
            Ok(None) => DEFAULT_GREETING.to_vec(),
            Err(error) => {
                warning!(self.logger, "Failed to read greeting: {error}");
                DEFAULT_GREETING.to_vec()
            }
        };

        let result = format!("{} {name}!", String::from_utf8_lossy(&greeting));

        if let Err(error) = stub.set_event(GREETED_EVENT, name.as_bytes().to_vec()) {
            warning!(self.logger, "Failed to emit {GREETED_EVENT} event: {error}");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chaincode_shim::{
        test::{MockStub, RecordingSink},
        Chaincode as _, ChaincodeEvent, ChaincodeLogger, ChaincodeStub, Invocation, LogLevel,
        StubError,
    };
    use futures::FutureExt as _;

    use super::{HelloChaincode, GREETED_EVENT, GREETING_KEY};

    /// A stub whose world state cannot be read.
    struct UnreadableStateStub {
        invocation: Invocation,
        event: Option<ChaincodeEvent>,
    }

    impl ChaincodeStub for UnreadableStateStub {
        fn invocation(&self) -> &Invocation {
            &self.invocation
        }

        fn tx_id(&self) -> &str {
            "tx-1"
        }

        fn channel_id(&self) -> &str {
            "mockchannel"
        }

        fn get_state(&self, _key: &str) -> Result<Option<Vec<u8>>, StubError> {
            Err(StubError::EmptyKey)
        }

        fn put_state(&mut self, _key: &str, _value: Vec<u8>) -> Result<(), StubError> {
            Ok(())
        }

        fn del_state(&mut self, _key: &str) -> Result<(), StubError> {
            Ok(())
        }

        fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), StubError> {
            self.event = Some(ChaincodeEvent {
                name: name.to_owned(),
                payload,
            });
            Ok(())
        }
    }

    #[test]
    fn unreadable_greeting_falls_back_to_default() {
        let sink = Arc::new(RecordingSink::default());
        let chaincode = HelloChaincode::load(ChaincodeLogger::with_sink("hello", sink.clone()));
        let mut stub = UnreadableStateStub {
            invocation: Invocation::new("hello", ["Ann"]),
            event: None,
        };

        let response = chaincode
            .invoke(&mut stub)
            .now_or_never()
            .expect("invoke should not await anything");

        assert!(response.is_success());
        assert_eq!(response.payload, b"Hello Ann!");
        assert_eq!(
            sink.messages_at(LogLevel::Warning),
            vec![format!("Failed to read greeting: {}", StubError::EmptyKey)]
        );
        assert_eq!(stub.event.map(|event| event.payload), Some(b"Ann".to_vec()));
    }

    #[test]
    fn init_without_argument_writes_nothing() {
        let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();

        let response = stub.mock_init("tx-1", Invocation::new("init", Vec::<&str>::new()));

        assert!(response.is_success());
        assert_eq!(stub.state(GREETING_KEY), None);
    }

    #[test]
    fn hello_emits_greeted_event() {
        let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();

        stub.mock_invoke("tx-1", Invocation::new("hello", ["Ann"]));

        assert_eq!(
            stub.last_event(),
            Some(&ChaincodeEvent {
                name: GREETED_EVENT.to_owned(),
                payload: b"Ann".to_vec(),
            })
        );
    }

    #[test]
    fn greeting_from_state_is_used_verbatim() {
        let (mut stub, _) = MockStub::<HelloChaincode>::with_recording_logger();
        stub.put_state(GREETING_KEY, "Bonjour");

        let response = stub.mock_invoke("tx-1", Invocation::new("hello", ["Zoé"]));

        assert_eq!(response.payload, "Bonjour Zoé!".as_bytes());
    }
}
