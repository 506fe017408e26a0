//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// Whether the store has assigned this entity an identity yet
    fn is_persisted(&self) -> bool;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    /// Empty or whitespace-only name
    #[error("Invalid input: {0}")]
    Validation(String),
    /// Unknown id in a registry, trip or item set
    #[error("Not found: {0}")]
    NotFound(String),
    /// Underlying storage read/write failure
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Trim a user-supplied name, rejecting empty results.
///
/// `what` names the field in the error message ("trip name", "category", ...).
pub fn normalize_name(raw: &str, what: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        log::warn!("Rejected empty {}", what);
        return Err(DomainError::Validation(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}
