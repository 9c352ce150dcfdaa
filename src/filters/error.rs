use thiserror::Error;

/// Errors raised while reading filters from user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter '{0}'")]
    UnknownKey(String),

    #[error("Expected key=value, got '{0}'")]
    MalformedPair(String),
}
