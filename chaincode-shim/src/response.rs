// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// The outcome of a chaincode call, as returned to the host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// A status code following HTTP semantics.
    pub status: i32,
    /// A human-readable message, set for errors.
    pub message: String,
    /// The result of a successful call.
    pub payload: Vec<u8>,
}

impl Response {
    /// The status of a successful call.
    pub const OK: i32 = 200;
    /// Any status at or above this threshold is an error.
    pub const ERROR_THRESHOLD: i32 = 400;
    /// The status of a failed call.
    pub const ERROR: i32 = 500;

    /// Creates a successful response carrying `payload`.
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Response {
            status: Self::OK,
            message: String::new(),
            payload: payload.into(),
        }
    }

    /// Creates an error response carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Response {
            status: Self::ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns `true` if the call succeeded.
    pub fn is_success(&self) -> bool {
        self.status < Self::ERROR_THRESHOLD
    }
}
