//! Error types for the meetics ecosystem.

use thiserror::Error;

/// Errors that can occur while converting and dispatching a meeting.
#[derive(Error, Debug)]
pub enum MeeticsError {
    #[error("Datetime field '{0}' is missing or malformed")]
    UnparseableDate(&'static str),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for meetics operations.
pub type MeeticsResult<T> = Result<T, MeeticsError>;
