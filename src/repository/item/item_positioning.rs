//! Item Positioning Operations
//!
//! Operations for managing item order within a trip.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult};
use super::super::db::{not_initialized, now_millis};
use super::item_repo::next_position;

/// Trait for item positioning operations
#[async_trait]
pub trait ItemPositioningOperations {
    /// Get next position in a trip (used in create)
    async fn get_next_position(&self, trip_id: u32) -> DomainResult<i32>;

    /// Move an item to a new position within its trip
    async fn move_item(&self, id: u32, new_position: i32) -> DomainResult<()>;
}

#[async_trait]
impl ItemPositioningOperations for super::item_repo::ItemRepository {
    async fn get_next_position(&self, trip_id: u32) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        next_position(conn, trip_id)
    }

    async fn move_item(&self, id: u32, new_position: i32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let found: Option<(u32, i32)> = tx
            .query_row(
                "SELECT trip_id, position FROM items WHERE id = ?",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (trip_id, old_position) =
            found.ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))?;

        if old_position == new_position {
            return Ok(());
        }

        if new_position < old_position {
            // Moving up: shift items in [new_position, old_position) down by +1
            tx.execute(
                "UPDATE items SET position = position + 1 WHERE trip_id = ? AND position >= ? AND position < ?",
                params![trip_id, new_position, old_position],
            )?;
        } else {
            // Moving down: shift items in (old_position, new_position] up by -1
            tx.execute(
                "UPDATE items SET position = position - 1 WHERE trip_id = ? AND position > ? AND position <= ?",
                params![trip_id, old_position, new_position],
            )?;
        }

        tx.execute(
            "UPDATE items SET position = ?, updated_at = ? WHERE id = ?",
            params![new_position, now_millis(), id],
        )?;

        reindex(&tx, trip_id)?;
        tx.commit()?;
        Ok(())
    }
}

/// Renumber a trip's items to sequential positions (0, 1, 2, ...)
fn reindex(conn: &Connection, trip_id: u32) -> DomainResult<()> {
    let ids = {
        let mut stmt =
            conn.prepare("SELECT id FROM items WHERE trip_id = ? ORDER BY position, id")?;
        let ids = stmt
            .query_map(params![trip_id], |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    for (new_pos, id) in ids.iter().enumerate() {
        conn.execute(
            "UPDATE items SET position = ? WHERE id = ?",
            params![new_pos as i32, *id],
        )?;
    }
    Ok(())
}
