use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the store failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the store was unexpected. (e.g. no row returned
    /// for an insert that asked for its representation)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Reasons a fact draft is rejected before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text is empty")]
    EmptyText,
    #[error("Text is too long: {len} characters (max {max})")]
    TextTooLong { len: usize, max: usize },
    #[error("Source is not a valid http(s) URL: {0:?}")]
    InvalidSource(String),
    #[error("Category is empty")]
    EmptyCategory,
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}
