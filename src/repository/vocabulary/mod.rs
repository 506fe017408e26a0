//! Vocabulary Repository Module
//!
//! This module provides registry functionality split into specialized sub-modules:
//! - vocabulary_repo: Core CRUD operations (add, list, remove)
//! - vocabulary_rename: Rename with propagation to items
//! - vocabulary_positioning: Sort order management

mod vocabulary_repo;
mod vocabulary_rename;
mod vocabulary_positioning;

pub use vocabulary_repo::VocabularyRepository;

// Re-export all operation traits so they can be used by importing VocabularyRepository
pub use vocabulary_rename::{RenameOutcome, VocabularyRenameOperations};
pub use vocabulary_positioning::VocabularyPositioningOperations;
