use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0} must be a valid JSON object")]
    InvalidInput(&'static str),

    #[error("invalid ignore-pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid task definition: {0}")]
    InvalidDocument(String),

    #[error("invalid task definition: could not find container definition named {0}")]
    ContainerNotFound(String),

    #[error("task definition file does not exist: {0}")]
    SourceRead(String),

    #[error("remote call failed: {0}")]
    RemoteCall(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
