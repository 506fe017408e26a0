//! Trip Entity
//!
//! A trip exclusively owns its items; deleting the trip deletes them.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::item::Item;

/// A trip and its ordered items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier (0 = not yet stored)
    pub id: u32,
    pub name: String,
    /// Creation time, unix millis
    pub created_at: i64,
    pub items: Vec<Item>,
}

/// Packed/total/progress summary for a trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    pub packed_count: usize,
    pub total_count: usize,
    /// Fraction packed in `0.0..=1.0`
    pub progress: f64,
}

impl TripStats {
    /// Summarise a slice of items
    pub fn from_items(items: &[Item]) -> Self {
        let packed_count = items.iter().filter(|i| i.is_packed).count();
        let total_count = items.len();
        let progress = if total_count == 0 {
            0.0
        } else {
            packed_count as f64 / total_count as f64
        };
        Self {
            packed_count,
            total_count,
            progress,
        }
    }
}

impl Trip {
    pub fn new(name: String, created_at: i64) -> Self {
        Self {
            id: 0,
            name,
            created_at,
            items: Vec::new(),
        }
    }

    pub fn packed_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_packed).count()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn progress(&self) -> f64 {
        self.stats().progress
    }

    pub fn stats(&self) -> TripStats {
        TripStats::from_items(&self.items)
    }

    /// Unsaved copy named "Copy of {name}" with every item copied unpacked
    pub fn duplicate(&self, created_at: i64) -> Self {
        Self {
            id: 0,
            name: format!("Copy of {}", self.name),
            created_at,
            items: self.items.iter().map(|item| item.copy_into(0)).collect(),
        }
    }
}

impl Entity for Trip {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_with(packed: &[bool]) -> Trip {
        let mut trip = Trip::new("Weekend".to_string(), 1_000);
        trip.id = 1;
        for (i, &is_packed) in packed.iter().enumerate() {
            let mut item = Item::new(1, format!("Item {}", i), "Misc".into(), "Garage".into());
            item.id = i as u32 + 1;
            item.is_packed = is_packed;
            trip.items.push(item);
        }
        trip
    }

    #[test]
    fn test_empty_trip_progress_is_zero() {
        let trip = trip_with(&[]);
        assert_eq!(trip.total_count(), 0);
        assert_eq!(trip.packed_count(), 0);
        assert_eq!(trip.progress(), 0.0);
    }

    #[test]
    fn test_progress_fraction() {
        let trip = trip_with(&[true, false, true, false]);
        let stats = trip.stats();
        assert_eq!(stats.packed_count, 2);
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.progress, 0.5);
    }

    #[test]
    fn test_progress_tracks_live_items() {
        let mut trip = trip_with(&[false, false]);
        assert_eq!(trip.progress(), 0.0);
        for item in &mut trip.items {
            item.is_packed = true;
        }
        assert_eq!(trip.progress(), 1.0);
    }

    #[test]
    fn test_duplicate_trip() {
        let source = trip_with(&[true, false, true]);
        let copy = source.duplicate(2_000);

        assert_eq!(copy.id, 0);
        assert_eq!(copy.name, "Copy of Weekend");
        assert_eq!(copy.created_at, 2_000);
        assert_eq!(copy.items.len(), source.items.len());
        for (copied, original) in copy.items.iter().zip(&source.items) {
            assert_eq!(copied.id, 0);
            assert!(!copied.is_packed);
            assert_eq!(copied.name, original.name);
            assert_eq!(copied.category, original.category);
            assert_eq!(copied.location, original.location);
        }
    }
}
