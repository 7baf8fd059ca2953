use thiserror::Error;

#[derive(Error, Debug)]
pub enum RinthError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Checksum verification failed")]
    ChecksumMismatch,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RinthError>;
