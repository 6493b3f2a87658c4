/// Errors raised by object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Storage is misconfigured (missing endpoint, bad credentials format).
    #[error("Storage configuration error: {0}")]
    Config(String),

    /// The object does not exist.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Uploading `name` failed.
    #[error("Failed to upload {name}: {message}")]
    Upload { name: String, message: String },

    /// Signing a temporary URL failed.
    #[error("Failed to presign {key}: {message}")]
    Presign { key: String, message: String },

    /// Any other backend failure.
    #[error("Storage error: {0}")]
    Backend(String),
}
