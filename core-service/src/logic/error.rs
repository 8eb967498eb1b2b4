//! Error handling

use thiserror::Error;

pub type MonitorResult<T> = Result<T, MonitorError>;

#[derive(Debug, Error)]
pub enum MonitorError {
    // Caller errors
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    // Startup errors
    #[error("Training failed: {0}")]
    TrainingFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Model storage errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Feature layout mismatch: expected v{expected_version} ({expected_hash:08x}), got v{actual_version} ({actual_hash:08x})")]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    #[error("Unsupported model format version {0}")]
    UnsupportedFormat(u32),
}

impl MonitorError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        MonitorError::InvalidInput { field, reason: reason.into() }
    }

    /// Caller-side errors; never treated as a system fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, MonitorError::InvalidInput { .. })
    }
}
