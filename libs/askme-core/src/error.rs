//! Error types for askme-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the scheduling core.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid rating {value:?}: expected an integer from 1 to 5")]
    InvalidQuality { value: String },

    #[error("duplicate item identifier {0}")]
    DuplicateIdentifier(String),

    #[error("unknown item identifier {0}")]
    UnknownIdentifier(String),

    #[error("invalid scheduler setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
