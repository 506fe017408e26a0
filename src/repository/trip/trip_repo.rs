//! Trip Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Trip CRUD. Trips are loaded together
//! with their items; deleting a trip removes its items in the same
//! transaction.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

use crate::domain::{DomainError, DomainResult, Item, Trip};
use super::super::db::{not_initialized, now_millis, SharedConnection};
use super::super::item::{insert_item, row_to_item, select_trip_items, ITEM_COLUMNS};
use super::super::traits::Repository;

/// SQLite implementation of Trip repository
#[derive(Clone)]
pub struct TripRepository {
    pub(super) conn: SharedConnection,
}

impl TripRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Trip> for TripRepository {
    /// Insert the trip and any items it already carries
    async fn create(&self, entity: &Trip) -> DomainResult<Trip> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let trip = insert_trip(&tx, entity)?;
        tx.commit()?;

        log::info!("Created trip {} '{}' with {} items", trip.id, trip.name, trip.items.len());
        Ok(trip)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Trip>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_trip(conn, id)
    }

    /// All trips, newest first
    async fn list(&self) -> DomainResult<Vec<Trip>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, created_at FROM trips ORDER BY created_at DESC, id DESC",
        )?;
        let mut trips = stmt
            .query_map([], row_to_trip)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM items ORDER BY trip_id, position, id",
            ITEM_COLUMNS
        ))?;
        let mut by_trip: HashMap<u32, Vec<Item>> = HashMap::new();
        for item in stmt.query_map([], row_to_item)? {
            let item = item?;
            by_trip.entry(item.trip_id).or_default().push(item);
        }

        for trip in &mut trips {
            trip.items = by_trip.remove(&trip.id).unwrap_or_default();
        }
        Ok(trips)
    }

    /// Rename only; items are saved through the item repository
    async fn update(&self, entity: &Trip) -> DomainResult<Trip> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE trips SET name = ?, updated_at = ? WHERE id = ?",
            params![entity.name, now_millis(), entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Trip {} not found", entity.id)));
        }

        select_trip(conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trip {} not found", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        // Manual cascade alongside the foreign key, so it holds even when
        // the pragma is off for a connection
        let removed_items = tx.execute("DELETE FROM items WHERE trip_id = ?", params![id])?;
        let changed = tx.execute("DELETE FROM trips WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Trip {} not found", id)));
        }
        tx.commit()?;

        log::info!("Deleted trip {} and {} items", id, removed_items);
        Ok(())
    }
}

pub(super) fn insert_trip(conn: &Connection, entity: &Trip) -> DomainResult<Trip> {
    conn.execute(
        "INSERT INTO trips (name, created_at, updated_at) VALUES (?, ?, ?)",
        params![entity.name, entity.created_at, now_millis()],
    )?;

    let trip_id = conn.last_insert_rowid() as u32;
    let mut trip = entity.clone();
    trip.id = trip_id;
    trip.items = entity
        .items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.id = 0;
            item.trip_id = trip_id;
            insert_item(conn, &item)
        })
        .collect::<DomainResult<Vec<_>>>()?;
    Ok(trip)
}

pub(super) fn select_trip(conn: &Connection, id: u32) -> DomainResult<Option<Trip>> {
    let trip = conn
        .query_row(
            "SELECT id, name, created_at FROM trips WHERE id = ?",
            params![id],
            row_to_trip,
        )
        .optional()?;

    match trip {
        Some(mut trip) => {
            trip.items = select_trip_items(conn, id)?;
            Ok(Some(trip))
        }
        None => Ok(None),
    }
}

fn row_to_trip(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        items: Vec::new(),
    })
}
