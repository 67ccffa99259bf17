// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Helper types for writing chaincode tests.
//!
//! [`MockStub`] drives a chaincode the way the host would, without a peer. Unit tests in a
//! chaincode crate usually enable the `test` feature of this crate as a dev-dependency.


pub use self::{
    mock_stub::MockStub,
    recording_sink::{LogRecord, RecordingSink},
};
