//! Item Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Item CRUD operations.
//! Specialized operations are in separate modules:
//! - item_trip: Trip-scoped operations (list, toggle, reset)
//! - item_positioning: Position management

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Item};
use super::super::db::{not_initialized, now_millis, SharedConnection};
use super::super::traits::Repository;

pub(crate) const ITEM_COLUMNS: &str =
    "id, trip_id, name, category, location, group_name, container, is_packed, is_optional, position";

/// SQLite implementation of Item repository
#[derive(Clone)]
pub struct ItemRepository {
    pub(super) conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let item = insert_item(conn, entity)?;
        log::info!("Created item {} '{}' in trip {}", item.id, item.name, item.trip_id);
        Ok(item)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_item(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items ORDER BY trip_id, position, id",
            ITEM_COLUMNS
        ))?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        // trip_id is deliberately absent: items never move between trips
        let changed = conn.execute(
            "UPDATE items SET name = ?, category = ?, location = ?, group_name = ?, container = ?, is_packed = ?, is_optional = ?, position = ?, updated_at = ? WHERE id = ?",
            params![
                entity.name,
                entity.category,
                entity.location,
                entity.group,
                entity.container,
                entity.is_packed,
                entity.is_optional,
                entity.position,
                now_millis(),
                entity.id
            ],
        )?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", entity.id)));
        }

        select_item(conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute("DELETE FROM items WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Item {} not found", id)));
        }
        log::info!("Deleted item {}", id);
        Ok(())
    }
}

/// Insert an item, appending it to its trip when `position` is 0
pub(crate) fn insert_item(conn: &Connection, entity: &Item) -> DomainResult<Item> {
    let trip_exists: Option<u32> = conn
        .query_row("SELECT id FROM trips WHERE id = ?", params![entity.trip_id], |row| row.get(0))
        .optional()?;
    if trip_exists.is_none() {
        return Err(DomainError::NotFound(format!("Trip {} not found", entity.trip_id)));
    }

    let position = if entity.position == 0 {
        next_position(conn, entity.trip_id)?
    } else {
        entity.position
    };

    conn.execute(
        "INSERT INTO items (trip_id, name, category, location, group_name, container, is_packed, is_optional, position, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            entity.trip_id,
            entity.name,
            entity.category,
            entity.location,
            entity.group,
            entity.container,
            entity.is_packed,
            entity.is_optional,
            position,
            now_millis()
        ],
    )?;

    let mut item = entity.clone();
    item.id = conn.last_insert_rowid() as u32;
    item.position = position;
    Ok(item)
}

pub(crate) fn next_position(conn: &Connection, trip_id: u32) -> DomainResult<i32> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM items WHERE trip_id = ?",
        params![trip_id],
        |row| row.get(0),
    )?;
    Ok(next)
}

pub(crate) fn select_item(conn: &Connection, id: u32) -> DomainResult<Option<Item>> {
    let item = conn
        .query_row(
            &format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS),
            params![id],
            row_to_item,
        )
        .optional()?;
    Ok(item)
}

/// Items of one trip in display order
pub(crate) fn select_trip_items(conn: &Connection, trip_id: u32) -> DomainResult<Vec<Item>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM items WHERE trip_id = ? ORDER BY position, id",
        ITEM_COLUMNS
    ))?;
    let items = stmt
        .query_map(params![trip_id], row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Convert a database row to Item
pub(crate) fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        location: row.get(4)?,
        group: row.get(5)?,
        container: row.get(6)?,
        is_packed: row.get(7)?,
        is_optional: row.get(8)?,
        position: row.get(9)?,
    })
}
