//! Item Trip Operations
//!
//! Operations for items scoped to a single trip.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Item};
use super::super::db::{not_initialized, now_millis};
use super::item_repo::{select_item, select_trip_items};

/// Trait for trip-scoped item operations
#[async_trait]
pub trait ItemTripOperations {
    /// List items of a trip in display order
    async fn list_by_trip(&self, trip_id: u32) -> DomainResult<Vec<Item>>;

    /// Flip the packed flag, returning the updated item
    async fn toggle_packed(&self, id: u32) -> DomainResult<Item>;

    /// Mark every item of a trip unpacked, returning how many changed
    async fn reset_packed(&self, trip_id: u32) -> DomainResult<u32>;
}

#[async_trait]
impl ItemTripOperations for super::item_repo::ItemRepository {
    async fn list_by_trip(&self, trip_id: u32) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_trip_items(conn, trip_id)
    }

    async fn toggle_packed(&self, id: u32) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE items SET is_packed = NOT is_packed, updated_at = ? WHERE id = ?",
            params![now_millis(), id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", id)));
        }

        let item = select_item(conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))?;
        log::debug!("Item {} packed = {}", id, item.is_packed);
        Ok(item)
    }

    async fn reset_packed(&self, trip_id: u32) -> DomainResult<u32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE items SET is_packed = 0, updated_at = ? WHERE trip_id = ? AND is_packed = 1",
            params![now_millis(), trip_id],
        )?;
        log::info!("Unpacked {} items in trip {}", changed, trip_id);
        Ok(changed as u32)
    }
}
