/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `SyncError`
pub type Result<T> = std::result::Result<T, SyncError>;

/// Core error type for Cadence
///
/// Missing structures and malformed individual items are never errors; they
/// decode to `None` or are skipped. Only corrupt structured payloads and
/// failures of the underlying tag library or file system surface here.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A rich payload could not be deserialized
    #[error("Corrupt rich payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tag library errors (reading or saving a container)
    #[error("Tag error: {0}")]
    Tag(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unsupported media format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Create a tag error
    pub fn tag(msg: impl Into<String>) -> Self {
        Self::Tag(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an unsupported format error
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_errors_convert_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SyncError = err.into();
        assert!(matches!(err, SyncError::Serialization(_)));
        assert!(err.to_string().starts_with("Corrupt rich payload"));
    }

    #[test]
    fn helper_constructors() {
        assert_eq!(SyncError::tag("boom").to_string(), "Tag error: boom");
        assert_eq!(
            SyncError::unsupported_format("wav").to_string(),
            "Unsupported format: wav"
        );
    }
}
