use thiserror::Error;

pub use crate::store::crypto::DecryptError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Decryption error: {0}")]
    Decrypt(#[from] DecryptError),

    #[error("unknown method '{0}' (expected word_based, char_based or line_based)")]
    UnknownMethod(String),

    #[error("key must be 64 hex characters encoding a 256-bit key")]
    KeyFormat,

    #[error("{0} must be at least 1")]
    InvalidThreshold(&'static str),

    #[error("document {0} not found")]
    DocumentNotFound(i64),

    #[error("report generation cancelled")]
    Cancelled,
}
