//! Vocabulary Rename Operations
//!
//! Items reference registry entries by name, so renaming an entry rewrites
//! the matching field of every item (in every trip) whose value equals the
//! old name ignoring case. Entry and items change in one transaction.

use async_trait::async_trait;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::domain::{normalize_name, DomainError, DomainResult, VocabularyEntry};
use super::super::db::{not_initialized, now_millis};
use super::vocabulary_repo::select_entry;

/// Result of a rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub entry: VocabularyEntry,
    /// Items whose field was rewritten to the new name
    pub items_updated: usize,
}

/// Trait for rename-with-propagation
#[async_trait]
pub trait VocabularyRenameOperations {
    /// Rename an entry and propagate the new name to items
    async fn rename(&self, id: u32, new_name: &str) -> DomainResult<RenameOutcome>;
}

#[async_trait]
impl VocabularyRenameOperations for super::vocabulary_repo::VocabularyRepository {
    async fn rename(&self, id: u32, new_name: &str) -> DomainResult<RenameOutcome> {
        let new_name = normalize_name(new_name, "name")?;

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let old = select_entry(&tx, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Entry {} not found", id)))?;

        let now = now_millis();
        tx.execute(
            "UPDATE vocabulary SET name = ?, updated_at = ? WHERE id = ?",
            params![new_name, now, id],
        )?;

        // Case-insensitive match done in Rust: SQLite's lower() only folds ASCII
        let column = old.kind.item_column();
        let matching: Vec<u32> = {
            let mut stmt = tx.prepare(&format!("SELECT id, {} FROM items", column))?;
            let rows = stmt
                .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter()
                .filter(|(_, value)| old.matches_name(value))
                .map(|(item_id, _)| item_id)
                .collect()
        };

        let sql = format!("UPDATE items SET {} = ?, updated_at = ? WHERE id = ?", column);
        for item_id in &matching {
            tx.execute(&sql, params![new_name, now, item_id])?;
        }

        tx.commit()?;

        log::info!(
            "Renamed {} '{}' -> '{}', {} items updated",
            old.kind.as_str(),
            old.name,
            new_name,
            matching.len()
        );

        Ok(RenameOutcome {
            entry: VocabularyEntry {
                name: new_name,
                ..old
            },
            items_updated: matching.len(),
        })
    }
}
