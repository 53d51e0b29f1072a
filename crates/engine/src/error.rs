//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when a currency code has no stored row.
//! - [`AlreadyExists`] thrown when a create collides with a stored code.
//! - [`Database`] wraps any failure coming from the storage layer.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`AlreadyExists`]: EngineError::AlreadyExists
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("currency {0} not found")]
    NotFound(String),
    #[error("currency {0} already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::AlreadyExists(a), Self::AlreadyExists(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
