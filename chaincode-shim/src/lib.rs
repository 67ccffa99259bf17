// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides an SDK for developing chaincode.
//!
//! A chaincode is a type implementing [`Chaincode`]. The host calls [`Chaincode::init`] once
//! when the chaincode is instantiated or upgraded, and [`Chaincode::invoke`] once per
//! transaction. Every effect of a call goes through the [`ChaincodeStub`] passed to it:
//! reading the invocation arguments, reading and writing world state, and setting the
//! transaction's event.
//!
//! The [`chaincode!`] macro generates the `main` function of a chaincode binary, which
//! serves the chaincode with the development host in [`server`].

#![deny(missing_docs)]

pub mod config;
pub mod log;
mod response;
pub mod server;
mod state;
mod stub;
#[cfg(any(test, feature = "test"))]
pub mod test;
pub mod tracing;

use std::process::ExitCode;

pub use self::{
    config::ChaincodeOptions,
    log::{ChaincodeLogger, LogLevel},
    response::Response,
    server::{serve, ServeError},
    state::{TransactionEffects, TransactionStub, WorldState},
    stub::{ChaincodeEvent, ChaincodeStub, Invocation, StubError},
};

/// The contract interface implemented by every chaincode.
///
/// Implementations must be safe to call concurrently: each call is a self-contained request
/// whose only inputs are the invocation and the world state visible through the stub.
#[allow(async_fn_in_trait)]
pub trait Chaincode: Send + Sync + Sized {
    /// The name of the logger the chaincode reports under.
    const NAME: &'static str;

    /// Creates the chaincode instance, handing it the logger it owns for its lifetime.
    fn load(logger: ChaincodeLogger) -> Self;

    /// Initializes the chaincode when it is instantiated or upgraded.
    async fn init(&self, stub: &mut impl ChaincodeStub) -> Response;

    /// Executes a transaction.
    async fn invoke(&self, stub: &mut impl ChaincodeStub) -> Response;
}

/// Declares the `main` function of a chaincode binary.
///
/// The generated function serves the chaincode with the development host on the standard
/// input and output, see [`start`].
#[macro_export]
macro_rules! chaincode {
    ($chaincode:ty) => {
        fn main() -> ::std::process::ExitCode {
            $crate::start::<$chaincode>()
        }
    };
}

/// Starts serving a chaincode on the standard input and output.
///
/// Options are read from the command line and the environment. Failures are reported on the
/// chaincode's logger at critical level.
pub fn start<C: Chaincode>() -> ExitCode {
    let options = <ChaincodeOptions as clap::Parser>::parse();
    tracing::init(C::NAME, options.logging_shim);

    let logger = ChaincodeLogger::new(C::NAME).with_level(options.logging_level);
    let chaincode = C::load(logger.clone());

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    match serve(&chaincode, &options, stdin, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            crate::critical!(logger, "Error starting chaincode: {error}");
            ExitCode::FAILURE
        }
    }
}
