//! Payload validation for the public API.
//!
//! Each schema is a function over the raw JSON body that reads its fields in
//! declaration order and stops at the first violated rule, so callers always
//! get exactly one human-readable message.

pub mod auth;
mod rules;
pub mod transaction;

use thiserror::Error;

/// The first rule a payload violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Outcome<T> = Result<T, ValidationError>;
