//! Vocabulary Entry
//!
//! User-managed option sets (categories, locations, pack times) that items
//! reference by name.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Which registry an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyKind {
    Category,
    Location,
    /// "Pack time" or person sub-group
    Group,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "category",
            VocabularyKind::Location => "location",
            VocabularyKind::Group => "group",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "category" => Some(VocabularyKind::Category),
            "location" => Some(VocabularyKind::Location),
            "group" => Some(VocabularyKind::Group),
            _ => None,
        }
    }

    /// Items column holding the soft reference for this kind
    pub(crate) fn item_column(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "category",
            VocabularyKind::Location => "location",
            VocabularyKind::Group => "group_name",
        }
    }
}

/// A named option in one registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Unique identifier (0 = not yet stored)
    pub id: u32,
    pub kind: VocabularyKind,
    /// Trimmed, non-empty display name
    pub name: String,
    /// Display order within the registry
    pub sort_order: i32,
}

impl VocabularyEntry {
    pub fn new(kind: VocabularyKind, name: String, sort_order: i32) -> Self {
        Self {
            id: 0,
            kind,
            name,
            sort_order,
        }
    }

    /// Case-insensitive name match, as used for rename propagation
    pub fn matches_name(&self, value: &str) -> bool {
        self.name.to_lowercase() == value.to_lowercase()
    }
}

impl Entity for VocabularyEntry {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
