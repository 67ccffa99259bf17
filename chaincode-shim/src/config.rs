// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Options of a chaincode process.

use crate::log::LogLevel;

/// Options read from the command line or from the environment the peer sets up for
/// chaincode containers.
#[derive(Clone, Debug, clap::Parser)]
#[command(
    name = "chaincode",
    version,
    about = "Serves a chaincode over line-delimited JSON on the standard input and output"
)]
pub struct ChaincodeOptions {
    /// The name the chaincode is registered under. Defaults to the chaincode's logger name.
    #[arg(long, env = "CORE_CHAINCODE_ID_NAME")]
    pub id_name: Option<String>,

    /// The channel transactions are reported on.
    #[arg(long, default_value = "devchannel", env = "CORE_CHAINCODE_CHANNEL_ID")]
    pub channel_id: String,

    /// The threshold of the chaincode's own logger.
    #[arg(long, default_value = "info", env = "CORE_CHAINCODE_LOGGING_LEVEL")]
    pub logging_level: LogLevel,

    /// The threshold of records emitted by the shim itself.
    #[arg(long, default_value = "warning", env = "CORE_CHAINCODE_LOGGING_SHIM")]
    pub logging_shim: LogLevel,
}

impl Default for ChaincodeOptions {
    fn default() -> Self {
        ChaincodeOptions {
            id_name: None,
            channel_id: "devchannel".to_owned(),
            logging_level: LogLevel::Info,
            logging_shim: LogLevel::Warning,
        }
    }
}

impl ChaincodeOptions {
    /// Returns the name the chaincode is registered under.
    pub fn id_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.id_name.as_deref().unwrap_or(default)
    }
}
