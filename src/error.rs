use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabulaError>;

#[derive(Debug, Error)]
pub enum TabulaError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid card ID format: {0}")]
    InvalidCardId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
