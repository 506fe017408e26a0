//! Vocabulary Positioning Operations
//!
//! Operations for managing the manual display order of a registry.

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::{DomainError, DomainResult, VocabularyKind};
use super::super::db::{not_initialized, now_millis};
use super::vocabulary_repo::select_entry;

/// Trait for registry ordering operations
#[async_trait]
pub trait VocabularyPositioningOperations {
    /// Sort order a newly added entry of `kind` would get
    async fn get_next_sort_order(&self, kind: VocabularyKind) -> DomainResult<i32>;

    /// Move an entry to a new position within its registry
    async fn move_entry(&self, id: u32, new_position: i32) -> DomainResult<()>;
}

#[async_trait]
impl VocabularyPositioningOperations for super::vocabulary_repo::VocabularyRepository {
    async fn get_next_sort_order(&self, kind: VocabularyKind) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        next_sort_order(conn, kind)
    }

    async fn move_entry(&self, id: u32, new_position: i32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let entry = select_entry(&tx, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Entry {} not found", id)))?;

        // Normalise first so positions are dense before shifting neighbours
        reindex_kind(&tx, entry.kind)?;
        let old_position: i32 = tx.query_row(
            "SELECT sort_order FROM vocabulary WHERE id = ?",
            params![id],
            |row| row.get(0),
        )?;
        let count: i32 = tx.query_row(
            "SELECT COUNT(*) FROM vocabulary WHERE kind = ?",
            params![entry.kind.as_str()],
            |row| row.get(0),
        )?;
        let new_position = new_position.clamp(0, count - 1);

        if old_position == new_position {
            tx.commit()?;
            return Ok(());
        }

        if new_position < old_position {
            // Moving up: shift entries in [new_position, old_position) down by +1
            tx.execute(
                "UPDATE vocabulary SET sort_order = sort_order + 1 WHERE kind = ? AND sort_order >= ? AND sort_order < ?",
                params![entry.kind.as_str(), new_position, old_position],
            )?;
        } else {
            // Moving down: shift entries in (old_position, new_position] up by -1
            tx.execute(
                "UPDATE vocabulary SET sort_order = sort_order - 1 WHERE kind = ? AND sort_order > ? AND sort_order <= ?",
                params![entry.kind.as_str(), old_position, new_position],
            )?;
        }

        tx.execute(
            "UPDATE vocabulary SET sort_order = ?, updated_at = ? WHERE id = ?",
            params![new_position, now_millis(), id],
        )?;
        tx.commit()?;

        log::info!("Moved {} '{}' to {}", entry.kind.as_str(), entry.name, new_position);
        Ok(())
    }
}

/// `max(sort_order) + 1`, or 0 for an empty registry
pub(super) fn next_sort_order(conn: &Connection, kind: VocabularyKind) -> DomainResult<i32> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM vocabulary WHERE kind = ?",
        params![kind.as_str()],
        |row| row.get(0),
    )?;
    Ok(next)
}

/// Renumber a registry to sequential sort orders (0, 1, 2, ...)
fn reindex_kind(conn: &Connection, kind: VocabularyKind) -> DomainResult<()> {
    let ids = {
        let mut stmt =
            conn.prepare("SELECT id FROM vocabulary WHERE kind = ? ORDER BY sort_order, id")?;
        let ids = stmt
            .query_map(params![kind.as_str()], |row| row.get::<_, u32>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    for (new_pos, id) in ids.iter().enumerate() {
        conn.execute(
            "UPDATE vocabulary SET sort_order = ? WHERE id = ?",
            params![new_pos as i32, *id],
        )?;
    }
    Ok(())
}
