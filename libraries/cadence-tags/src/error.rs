/// Tag-access errors
use cadence_core::SyncError;
use thiserror::Error;

/// Result type alias using `TagError`
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while opening, reading or saving media files
#[derive(Error, Debug)]
pub enum TagError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Sync engine error
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// ID3v2 error
    #[error(transparent)]
    Id3(#[from] id3::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<TagError> for SyncError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::Sync(inner) => inner,
            TagError::Io(inner) => SyncError::Io(inner),
            TagError::UnsupportedFormat(format) => SyncError::unsupported_format(format),
            other => SyncError::tag(other.to_string()),
        }
    }
}
