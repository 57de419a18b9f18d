use std::time::Duration;
use thiserror::Error;

/// Failure attached to a measured operation.
///
/// The rendered message is what ends up in the error set of a summary,
/// so two errors are considered the same when they display the same text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Message(String),
}

impl From<std::io::Error> for RequestError {
    fn from(value: std::io::Error) -> Self {
        RequestError::Message(value.to_string())
    }
}

impl From<&str> for RequestError {
    fn from(value: &str) -> Self {
        RequestError::Message(value.to_owned())
    }
}

impl From<String> for RequestError {
    fn from(value: String) -> Self {
        RequestError::Message(value)
    }
}
