// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A development host serving a chaincode over line-delimited JSON.
//!
//! Each input line is a [`Request`] and produces exactly one output line holding a
//! [`ResponseLine`]. Transactions run against an in-memory [`WorldState`] that lives as long
//! as the serving loop.
//!
//! ```text
//! {"type": "init", "args": ["init", "Hi"]}
//! {"type": "invoke", "tx_id": "t1", "args": ["hello", "Ann"]}
//! {"type": "query", "args": ["hello"]}
//! ```

use std::io::{self, BufRead, Write};

use base64::engine::{general_purpose::STANDARD, Engine as _};
use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::{
    Chaincode, ChaincodeEvent, ChaincodeOptions, Invocation, Response, TransactionStub,
    WorldState,
};

/// The kind of call a [`Request`] asks for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Calls [`Chaincode::init`] and commits its writes on success.
    Init,
    /// Calls [`Chaincode::invoke`] and commits its writes on success.
    Invoke,
    /// Calls [`Chaincode::invoke`] without committing anything.
    Query,
}

/// One call requested by the client of the development host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// What to call.
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// The transaction ID; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// The function name followed by its parameters.
    #[serde(default)]
    pub args: Vec<String>,
}

/// An event as reported by the development host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventLine {
    /// The event name.
    pub name: String,
    /// The base64-encoded event payload.
    pub payload: String,
}

/// The outcome of one [`Request`] as written by the development host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResponseLine {
    /// The transaction ID of the request.
    pub tx_id: String,
    /// The status of the chaincode [`Response`].
    pub status: i32,
    /// The message of the chaincode [`Response`].
    pub message: String,
    /// The base64-encoded payload of the chaincode [`Response`].
    pub payload: String,
    /// The event committed with the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventLine>,
}

impl ResponseLine {
    fn new(tx_id: String, response: Response, event: Option<ChaincodeEvent>) -> Self {
        ResponseLine {
            tx_id,
            status: response.status,
            message: response.message,
            payload: STANDARD.encode(response.payload),
            event: event.map(|event| EventLine {
                name: event.name,
                payload: STANDARD.encode(event.payload),
            }),
        }
    }

    /// Decodes the payload.
    pub fn decoded_payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.payload)
    }
}

/// Failures ending the serving loop.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Reading requests or writing responses failed.
    #[error("I/O error while serving chaincode: {0}")]
    Io(#[from] io::Error),

    /// A response could not be encoded.
    #[error("failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serves `chaincode` until `reader` is exhausted.
///
/// Requests that cannot be decoded are answered with an error response; only I/O and
/// encoding failures stop the loop.
#[instrument(skip_all, fields(chaincode = options.id_name(C::NAME)))]
pub fn serve<C: Chaincode>(
    chaincode: &C,
    options: &ChaincodeOptions,
    reader: impl BufRead,
    mut writer: impl Write,
) -> Result<(), ServeError> {
    let mut host = Host::new(options.channel_id.clone());
    info!("Serving chaincode on channel {}", options.channel_id);

    for line in reader.split(b'\n') {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        // Lines are decoded as bytes so that invalid UTF-8 is rejected like any malformed
        // request.
        let response = match serde_json::from_slice::<Request>(&line) {
            Ok(request) => host.execute(chaincode, request),
            Err(error) => {
                warn!("Rejecting malformed request: {error}");
                let tx_id = host.next_tx_id();
                ResponseLine::new(
                    tx_id,
                    Response::error(format!("Malformed request: {error}")),
                    None,
                )
            }
        };

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    info!("Input closed, stopping chaincode");
    Ok(())
}

/// The state the development host keeps between requests.
struct Host {
    channel_id: String,
    state: WorldState,
    tx_counter: u64,
}

impl Host {
    fn new(channel_id: String) -> Self {
        Host {
            channel_id,
            state: WorldState::default(),
            tx_counter: 0,
        }
    }

    fn next_tx_id(&mut self) -> String {
        self.tx_counter += 1;
        format!("tx-{}", self.tx_counter)
    }

    fn execute<C: Chaincode>(&mut self, chaincode: &C, request: Request) -> ResponseLine {
        let tx_id = match request.tx_id {
            Some(tx_id) => tx_id,
            None => self.next_tx_id(),
        };
        let invocation = Invocation::new(
            request.args.first().map_or("", String::as_str),
            request.args.iter().skip(1),
        );
        debug!(%tx_id, kind = ?request.kind, "Executing request");

        let mut stub =
            TransactionStub::new(&self.state, invocation, tx_id.clone(), &self.channel_id);
        let response = match request.kind {
            RequestKind::Init => block_on(chaincode.init(&mut stub)),
            RequestKind::Invoke | RequestKind::Query => block_on(chaincode.invoke(&mut stub)),
        };
        let effects = stub.into_effects();

        if request.kind == RequestKind::Query || !response.is_success() {
            debug!(%tx_id, "Discarding {} pending writes", effects.writes.len());
            return ResponseLine::new(tx_id, response, None);
        }

        self.state.commit(effects.writes);
        ResponseLine::new(tx_id, response, effects.event)
    }
}
