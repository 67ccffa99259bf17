// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The invocation context handed to chaincode by the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The arguments of a chaincode call.
///
/// By convention the first argument is the name of the function to call and the remaining
/// ones are its parameters.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    args: Vec<Vec<u8>>,
}

impl Invocation {
    /// Creates an invocation of `function` with the given `parameters`.
    pub fn new<S: AsRef<str>>(function: &str, parameters: impl IntoIterator<Item = S>) -> Self {
        let args = std::iter::once(function.as_bytes().to_vec())
            .chain(
                parameters
                    .into_iter()
                    .map(|parameter| parameter.as_ref().as_bytes().to_vec()),
            )
            .collect();
        Invocation { args }
    }

    /// Creates an invocation from raw arguments.
    pub fn from_args(args: Vec<Vec<u8>>) -> Self {
        Invocation { args }
    }

    /// Returns the raw arguments.
    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }

    /// Returns the arguments as strings, replacing invalid UTF-8 sequences.
    pub fn string_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect()
    }

    /// Splits the arguments into the function name and its parameters.
    ///
    /// An empty invocation has an empty function name and no parameters.
    pub fn function_and_parameters(&self) -> (String, Vec<String>) {
        let mut args = self.string_args().into_iter();
        let function = args.next().unwrap_or_default();
        (function, args.collect())
    }
}

/// An event set by a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChaincodeEvent {
    /// The name listeners subscribe to.
    pub name: String,
    /// The event data.
    pub payload: Vec<u8>,
}

/// Misuse of the state or event API.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum StubError {
    /// State keys must not be empty.
    #[error("key must not be an empty string")]
    EmptyKey,

    /// Event names must not be empty.
    #[error("event name must not be an empty string")]
    EmptyEventName,
}

/// The interface through which a chaincode call reaches the host.
pub trait ChaincodeStub {
    /// Returns the invocation being executed.
    fn invocation(&self) -> &Invocation;

    /// Returns the ID of the transaction being executed.
    fn tx_id(&self) -> &str;

    /// Returns the ID of the channel the transaction was submitted to.
    fn channel_id(&self) -> &str;

    /// Reads the value stored under `key`, if any.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;

    /// Writes `value` under `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError>;

    /// Removes the value stored under `key`.
    fn del_state(&mut self, key: &str) -> Result<(), StubError>;

    /// Sets the event of the transaction, replacing any event set before.
    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), StubError>;

    /// Returns the raw arguments of the invocation.
    fn args(&self) -> &[Vec<u8>] {
        self.invocation().args()
    }

    /// Returns the arguments of the invocation as strings.
    fn string_args(&self) -> Vec<String> {
        self.invocation().string_args()
    }

    /// Returns the function name and the parameters of the invocation.
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        self.invocation().function_and_parameters()
    }
}
