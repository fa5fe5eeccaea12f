//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::record::RecordId;

/// Domain errors represent violations of catalog and ring invariants.
///
/// Absent ids and duplicate inserts are not errors; they are reported
/// through `Option` and [`InsertOutcome`](crate::domain::InsertOutcome).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown record id: {0}")]
    UnknownRecord(RecordId),

    #[error("owner handle is stale or unknown")]
    UnknownOwner,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
