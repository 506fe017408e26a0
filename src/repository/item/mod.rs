//! Item Repository Module
//!
//! This module provides item repository functionality split into specialized sub-modules:
//! - item_repo: Core CRUD operations
//! - item_trip: Trip-scoped operations (list, toggle packed, reset)
//! - item_positioning: Position management

mod item_repo;
mod item_trip;
mod item_positioning;

pub use item_repo::ItemRepository;
pub(crate) use item_repo::{insert_item, row_to_item, select_trip_items, ITEM_COLUMNS};

// Re-export all operation traits so they can be used by importing ItemRepository
pub use item_trip::ItemTripOperations;
pub use item_positioning::ItemPositioningOperations;
