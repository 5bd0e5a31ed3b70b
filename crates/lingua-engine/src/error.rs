//! Error types for lingua-engine operations.
//!
//! "Nothing found" is never an error: extraction functions report it with
//! `None` or an empty `Vec`. Errors are reserved for requests the engine
//! cannot serve at all.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinguaError {
    #[error("Not localized for '{0}'")]
    NotLocalized(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, LinguaError>;
