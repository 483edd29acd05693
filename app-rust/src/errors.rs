use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} must be an http(s) URL, got {1:?}")]
    InvalidUrl(&'static str, String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;
