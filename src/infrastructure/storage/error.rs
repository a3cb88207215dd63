use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Network, permission or missing-object failure talking to the bucket.
    #[error("Remote storage error: {0}")]
    Remote(String),

    #[error("Local filesystem error: {0}")]
    LocalIo(#[from] std::io::Error),
}

impl StorageError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }
}
