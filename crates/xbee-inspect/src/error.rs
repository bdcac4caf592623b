//! Tool errors and exit codes.

use thiserror::Error;
use xbee_api::ApiError;

/// Exit code for any codec, configuration or input error.
pub const FAILURE: i32 = 1;

/// Errors reported by `xbee-inspect`.
#[derive(Error, Debug)]
pub enum CliError {
    /// Encoding, decoding or schema loading failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A frame body argument was not valid hex.
    #[error("invalid hex frame body: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// JSON output could not be rendered.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML output could not be rendered.
    #[error("YAML output error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type CliResult<T> = Result<T, CliError>;
