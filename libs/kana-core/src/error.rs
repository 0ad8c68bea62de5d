//! Error types for kana-core.

use crate::types::ItemId;
use thiserror::Error;

/// Result type alias using DataError.
pub type Result<T> = std::result::Result<T, DataError>;

/// Integrity violations in reference data, caught at pool construction.
///
/// A wrong answer or an exhausted pool is a normal outcome and never
/// surfaces here.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("pool contains no items")]
    EmptyPool,

    #[error("duplicate item identity {id}")]
    DuplicateIdentity { id: ItemId },

    #[error("item {id} has no canonical answers")]
    NoAnswers { id: ItemId },

    #[error("item {id} has an empty canonical answer")]
    EmptyAnswer { id: ItemId },
}
