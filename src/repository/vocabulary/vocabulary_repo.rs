//! Vocabulary Repository - Core CRUD Operations
//!
//! SQLite-backed registries for categories, locations and pack times.
//! Specialized operations are in separate modules:
//! - vocabulary_rename: Rename with propagation to items
//! - vocabulary_positioning: Sort order management

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{normalize_name, DomainError, DomainResult, VocabularyEntry, VocabularyKind};
use super::super::db::{not_initialized, now_millis, SharedConnection};
use super::super::traits::Repository;
use super::vocabulary_positioning::next_sort_order;

/// SQLite implementation of the vocabulary registries
#[derive(Clone)]
pub struct VocabularyRepository {
    pub(super) conn: SharedConnection,
}

impl VocabularyRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Add a trimmed entry at the end of its registry
    pub async fn add(&self, kind: VocabularyKind, name: &str) -> DomainResult<VocabularyEntry> {
        let name = normalize_name(name, kind.as_str())?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let sort_order = next_sort_order(conn, kind)?;
        let entry = insert_entry(conn, &VocabularyEntry::new(kind, name, sort_order))?;
        log::info!("Added {} '{}' at {}", kind.as_str(), entry.name, entry.sort_order);
        Ok(entry)
    }

    /// Entries of one registry in display order
    pub async fn list_kind(&self, kind: VocabularyKind) -> DomainResult<Vec<VocabularyEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_kind(conn, kind)
    }

    pub async fn count(&self, kind: VocabularyKind) -> DomainResult<u32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let count = conn.query_row(
            "SELECT COUNT(*) FROM vocabulary WHERE kind = ?",
            params![kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Insert `entries` in one transaction, but only when every registry in
    /// `guard_kinds` is empty. Returns whether anything was inserted.
    pub async fn insert_all_if_empty(
        &self,
        guard_kinds: &[VocabularyKind],
        entries: &[VocabularyEntry],
    ) -> DomainResult<bool> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        for kind in guard_kinds {
            let count: u32 = tx.query_row(
                "SELECT COUNT(*) FROM vocabulary WHERE kind = ?",
                params![kind.as_str()],
                |row| row.get(0),
            )?;
            if count > 0 {
                return Ok(false);
            }
        }

        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;
        Ok(true)
    }
}

#[async_trait]
impl Repository<VocabularyEntry> for VocabularyRepository {
    /// Insert as given (explicit sort order); `add` is the appending variant
    async fn create(&self, entity: &VocabularyEntry) -> DomainResult<VocabularyEntry> {
        let mut entry = entity.clone();
        entry.name = normalize_name(&entity.name, entity.kind.as_str())?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        insert_entry(conn, &entry)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<VocabularyEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        select_entry(conn, id)
    }

    /// Every registry, grouped by kind, each in display order
    async fn list(&self) -> DomainResult<Vec<VocabularyEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(
            "SELECT id, kind, name, sort_order FROM vocabulary ORDER BY kind, sort_order, id",
        )?;
        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Plain update of name and sort order. Items are not touched; use
    /// `VocabularyRenameOperations::rename` to carry a new name over to items.
    async fn update(&self, entity: &VocabularyEntry) -> DomainResult<VocabularyEntry> {
        let name = normalize_name(&entity.name, entity.kind.as_str())?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE vocabulary SET name = ?, sort_order = ?, updated_at = ? WHERE id = ?",
            params![name, entity.sort_order, now_millis(), entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Entry {} not found", entity.id)));
        }

        select_entry(conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Entry {} not found", entity.id)))
    }

    /// Remove the entry only. Items keep their text value.
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute("DELETE FROM vocabulary WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Entry {} not found", id)));
        }
        log::info!("Removed vocabulary entry {}", id);
        Ok(())
    }
}

pub(super) fn insert_entry(
    conn: &Connection,
    entry: &VocabularyEntry,
) -> DomainResult<VocabularyEntry> {
    conn.execute(
        "INSERT INTO vocabulary (kind, name, sort_order, updated_at) VALUES (?, ?, ?, ?)",
        params![entry.kind.as_str(), entry.name, entry.sort_order, now_millis()],
    )?;

    let mut created = entry.clone();
    created.id = conn.last_insert_rowid() as u32;
    Ok(created)
}

pub(super) fn select_entry(conn: &Connection, id: u32) -> DomainResult<Option<VocabularyEntry>> {
    let entry = conn
        .query_row(
            "SELECT id, kind, name, sort_order FROM vocabulary WHERE id = ?",
            params![id],
            row_to_entry,
        )
        .optional()?;
    Ok(entry)
}

pub(super) fn select_kind(
    conn: &Connection,
    kind: VocabularyKind,
) -> DomainResult<Vec<VocabularyEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, name, sort_order FROM vocabulary WHERE kind = ? ORDER BY sort_order, id",
    )?;
    let entries = stmt
        .query_map(params![kind.as_str()], row_to_entry)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Convert a database row to VocabularyEntry
fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<VocabularyEntry> {
    let kind: String = row.get(1)?;
    let kind = VocabularyKind::from_str(&kind)
        .ok_or_else(|| rusqlite::Error::InvalidColumnType(1, "kind".to_string(), Type::Text))?;

    Ok(VocabularyEntry {
        id: row.get(0)?,
        kind,
        name: row.get(2)?,
        sort_order: row.get(3)?,
    })
}
