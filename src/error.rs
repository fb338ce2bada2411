//! Error types for mediabase.

use thiserror::Error;

/// Common error type for media field operations.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Field policy or configuration error.
    ///
    /// Raised while a field is being set up (e.g. a malformed MAX-SIZE value),
    /// never during an upload.
    #[error("configuration error: {0}")]
    Config(String),

    /// Upload rejected by the field policy.
    ///
    /// The message is meant to be shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// JSON payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Absorption was called with an input kind it does not understand.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// Operation not available at this layer.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Multipart stream error while buffering an upload.
    #[error("upload error: {0}")]
    Upload(String),
}

impl From<axum::extract::multipart::MultipartError> for MediaError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        MediaError::Upload(e.to_string())
    }
}

/// Result type alias for media field operations.
pub type Result<T> = std::result::Result<T, MediaError>;
