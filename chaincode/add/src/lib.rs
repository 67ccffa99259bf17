// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! Chaincode summing the numbers it is invoked with.

The `add` function takes two or more decimal arguments and returns their sum encoded as
JSON. The chaincode keeps no world state. */

use std::num::ParseFloatError;

use chaincode_shim::{critical, info, Chaincode, ChaincodeLogger, ChaincodeStub, Response};
use thiserror::Error;

/// Magnitudes at or above this bound are written in exponent notation.
const MAX_PLAIN_MAGNITUDE: f64 = 1e21;
/// Non-zero magnitudes below this bound are written in exponent notation.
const MIN_PLAIN_MAGNITUDE: f64 = 1e-6;

pub struct AddChaincode {
    logger: ChaincodeLogger,
}

impl Chaincode for AddChaincode {
    const NAME: &'static str = "add";

    fn load(logger: ChaincodeLogger) -> Self {
        AddChaincode { logger }
    }

    async fn init(&self, _stub: &mut impl ChaincodeStub) -> Response {
        info!(self.logger, "Init");
        Response::success(Vec::new())
    }

    async fn invoke(&self, stub: &mut impl ChaincodeStub) -> Response {
        let (function, parameters) = stub.function_and_parameters();
        info!(self.logger, "Invoke: {function}");

        match self.execute(&function, &parameters) {
            Ok(payload) => Response::success(payload),
            Err(error) => Response::error(error.to_string()),
        }
    }
}

impl AddChaincode {
    fn execute(&self, function: &str, parameters: &[String]) -> Result<Vec<u8>, AddError> {
        match function {
            "add" => {
                let payload = encode_sum(sum_arguments(parameters)?)?;
                info!(self.logger, "Result: {}", String::from_utf8_lossy(&payload));
                Ok(payload)
            }
            _ => {
                critical!(self.logger, "Unsupported operation: {function}");
                Err(AddError::UnsupportedOperation(function.to_owned()))
            }
        }
    }
}

/// Parses every argument as an `f64` and adds them up in order.
///
/// Stops at the first argument that is not a number. Finite literals too large for an `f64`
/// are rejected rather than rounded to infinity.
pub fn sum_arguments<S: AsRef<str>>(arguments: &[S]) -> Result<f64, AddError> {
    if arguments.len() < 2 {
        return Err(AddError::NotEnoughArguments);
    }

    arguments
        .iter()
        .try_fold(0.0, |sum, argument| Ok(sum + parse_number(argument.as_ref())?))
}

fn parse_number(argument: &str) -> Result<f64, AddError> {
    let value = argument
        .parse::<f64>()
        .map_err(|source| AddError::InvalidNumber {
            argument: argument.to_owned(),
            source,
        })?;
    if value.is_infinite() && !is_infinity_literal(argument) {
        return Err(AddError::OutOfRange {
            argument: argument.to_owned(),
        });
    }
    Ok(value)
}

fn is_infinity_literal(argument: &str) -> bool {
    let unsigned = argument
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(argument);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Encodes `sum` as a JSON number.
///
/// Zero and magnitudes in `[1e-6, 1e21)` are written in plain decimal notation, so integral
/// sums have no fractional part. Other magnitudes use exponent notation. Infinities and NaN
/// have no JSON representation.
pub fn encode_sum(sum: f64) -> Result<Vec<u8>, AddError> {
    if !sum.is_finite() {
        return Err(AddError::UnsupportedValue(sum));
    }
    let magnitude = sum.abs();
    if magnitude == 0.0 || (MIN_PLAIN_MAGNITUDE..MAX_PLAIN_MAGNITUDE).contains(&magnitude) {
        // `Display` writes the shortest round-trip digits and never an exponent.
        return Ok(sum.to_string().into_bytes());
    }
    Ok(serde_json::to_vec(&sum)?)
}

/// An error that can occur while executing the `add` chaincode.
#[derive(Debug, Error)]
pub enum AddError {
    #[error("add operation must include at least two arguments")]
    NotEnoughArguments,

    #[error("Failed to convert '{argument}' to number: {source}")]
    InvalidNumber {
        argument: String,
        source: ParseFloatError,
    },

    #[error("Failed to convert '{argument}' to number: value out of range")]
    OutOfRange { argument: String },

    #[error("Failed to marshal sum: unsupported value: {0}")]
    UnsupportedValue(f64),

    #[error("Failed to marshal sum: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
