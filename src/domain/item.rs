//! Item Entity
//!
//! A packable thing belonging to exactly one trip. Category, location and
//! group are stored as plain names, not ids: they stay valid even after the
//! matching registry entry is renamed away or deleted.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::vocabulary::VocabularyKind;

/// A packing-list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (0 = not yet stored)
    pub id: u32,
    /// Owning trip, fixed at creation
    pub trip_id: u32,
    /// Item name
    pub name: String,
    /// Category name (soft reference)
    pub category: String,
    /// Location name (soft reference)
    pub location: String,
    /// Pack-time / sub-group name, empty = no group
    pub group: String,
    /// Bag or box to put the item in, free text
    pub container: String,
    pub is_packed: bool,
    pub is_optional: bool,
    /// Position within the trip (for ordering)
    pub position: i32,
}

impl Item {
    /// Create a new unpacked item with no group or container
    pub fn new(trip_id: u32, name: String, category: String, location: String) -> Self {
        Self {
            id: 0,
            trip_id,
            name,
            category,
            location,
            group: String::new(),
            container: String::new(),
            is_packed: false,
            is_optional: false,
            position: 0,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }

    /// The soft-reference value this item carries for a registry kind
    pub fn field(&self, kind: VocabularyKind) -> &str {
        match kind {
            VocabularyKind::Category => &self.category,
            VocabularyKind::Location => &self.location,
            VocabularyKind::Group => &self.group,
        }
    }

    /// Unsaved copy named "Copy of {name}", unpacked, same trip
    pub fn duplicate(&self) -> Self {
        let mut copy = self.copy_into(self.trip_id);
        copy.name = format!("Copy of {}", self.name);
        copy
    }

    /// Unsaved copy for another trip: same name and fields, unpacked
    pub fn copy_into(&self, trip_id: u32) -> Self {
        Self {
            id: 0,
            trip_id,
            is_packed: false,
            ..self.clone()
        }
    }
}

impl Entity for Item {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
