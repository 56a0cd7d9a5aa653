//! Error types for crewboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown employee or task)
//! - 4: Operation failed (request error, unexpected API response)

use thiserror::Error;

/// Exit codes for the crewboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for crewboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    // Operation failures (exit code 4)
    #[error("API request to {endpoint} failed with status {status}")]
    Api { endpoint: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::TaskNotFound(_)
            | Error::EmployeeNotFound(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Api { .. }
            | Error::Http(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error envelopes, when available.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Api { endpoint, status } => Some(serde_json::json!({
                "endpoint": endpoint,
                "status": status,
            })),
            _ => None,
        }
    }
}

/// Result type alias for crewboard operations
pub type Result<T> = std::result::Result<T, Error>;
