use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid item collection: {0}")]
    InvalidItems(String),

    #[error("Invalid sort column: {0}")]
    InvalidSort(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
