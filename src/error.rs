use thiserror::Error;

pub type Result<T> = std::result::Result<T, GfillError>;

#[derive(Error, Debug)]
pub enum GfillError {
    #[error("Command failed: {command}: {details}")]
    CommandFailed { command: String, details: String },
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid state: {0}")]
    State(String),
}
