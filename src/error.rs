use thiserror::Error;

use crate::domain::VersionComponent;

/// Unified error type for plugin-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{component} version {value} exceeds AU limit of 255")]
    RangeExceeded {
        component: VersionComponent,
        value: u64,
    },

    #[error("Build number {value} cannot be incremented")]
    BuildOverflow { value: u64 },

    #[error("Invalid value for {key}: '{value}' is not a non-negative integer")]
    InvalidValue { key: String, value: String },

    #[error("Rewrite provider unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in plugin-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a rewrite-provider failure with context
    pub fn unavailable(msg: impl Into<String>) -> Self {
        ReleaseError::CollaboratorUnavailable(msg.into())
    }

    /// Create an invalid stored value error
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        ReleaseError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// True for the range failure that must abort a bump before persistence
    pub fn is_range_exceeded(&self) -> bool {
        matches!(self, ReleaseError::RangeExceeded { .. })
    }
}
