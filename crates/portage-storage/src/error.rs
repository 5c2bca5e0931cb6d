use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read collection: {0}")]
    Read(String),

    #[error("failed to write collection: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] portage_core::error::CoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("backend unavailable")]
    Unavailable,
}
