//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde for serialization,
//! thiserror for the error type).

mod entity;
mod item;
mod trip;
mod vocabulary;

pub use entity::{normalize_name, DomainError, DomainResult, Entity};
pub use item::Item;
pub use trip::{Trip, TripStats};
pub use vocabulary::{VocabularyEntry, VocabularyKind};
