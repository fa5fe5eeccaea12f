//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, RecordId};

/// Application errors wrap domain errors and add use-case context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("owner name must not be empty")]
    InvalidOwnerName,

    #[error("owner already exists: {0}")]
    DuplicateOwner(String),

    #[error("owner not found: {0}")]
    OwnerNotFound(String),

    #[error("no owner at position {0}")]
    InvalidPosition(usize),

    #[error("invalid starter choice: {0}")]
    InvalidStarter(usize),

    #[error("pokemon {0} is not in this pokedex")]
    RecordNotOwned(RecordId),

    #[error("cannot merge an owner with itself")]
    SameOwner,

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
