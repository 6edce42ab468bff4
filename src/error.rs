//! Error types for skaffix.
//!
//! Uses thiserror for derive macros. The migration core only ever produces
//! `UnknownVersion` and `Decode`; mapping between schema versions cannot fail.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for skaffix operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The declared `apiVersion` has no registered schema.
    #[error("unknown api version: '{0}'")]
    UnknownVersion(String),

    /// The document does not match the structure of its declared version.
    #[error("failed to decode {version} config: {message}")]
    Decode { version: String, message: String },

    /// Invalid arguments or a failed file operation in the CLI.
    #[error("{0}")]
    UserError(String),
}

impl SchemaError {
    /// Build a decode error for the given schema version.
    pub fn decode(version: impl Into<String>, message: impl std::fmt::Display) -> Self {
        SchemaError::Decode {
            version: version.into(),
            message: message.to_string(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchemaError::UnknownVersion(_) => exit_codes::UNKNOWN_VERSION,
            SchemaError::Decode { .. } => exit_codes::DECODE_FAILURE,
            SchemaError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for skaffix operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
