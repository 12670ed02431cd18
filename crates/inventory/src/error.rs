//! Store-level failures.

use std::path::PathBuf;

use stockpile_core::DomainError;
use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("item `{item}` not found in inventory")]
    NotFound { item: String },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON that is not an object of item → number.
    #[error("invalid data format in {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },
}

impl InventoryError {
    pub(crate) fn not_found(item: &str) -> Self {
        Self::NotFound {
            item: item.to_string(),
        }
    }

    /// True for a rejected input (bad name or quantity) that left the store untouched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Validation(_)))
    }
}
