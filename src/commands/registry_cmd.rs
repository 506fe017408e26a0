//! Commands for the option registries (categories, locations, pack times)

use crate::domain::{DomainResult, VocabularyEntry, VocabularyKind};
use crate::repository::vocabulary::{
    RenameOutcome, VocabularyPositioningOperations, VocabularyRenameOperations,
};
use crate::repository::Repository;
use crate::AppState;

/// Add an option at the end of its registry
pub async fn add_option(
    state: &AppState,
    kind: VocabularyKind,
    name: &str,
) -> DomainResult<VocabularyEntry> {
    state.vocabulary_repo.add(kind, name).await
}

/// Rename an option; items using the old name (any casing) follow
pub async fn rename_option(state: &AppState, id: u32, name: &str) -> DomainResult<RenameOutcome> {
    state.vocabulary_repo.rename(id, name).await
}

/// Remove an option. Items keep the name as text.
pub async fn remove_option(state: &AppState, id: u32) -> DomainResult<()> {
    state.vocabulary_repo.delete(id).await
}

pub async fn get_option(state: &AppState, id: u32) -> DomainResult<Option<VocabularyEntry>> {
    state.vocabulary_repo.find_by_id(id).await
}

/// Options of one registry in display order
pub async fn list_options(
    state: &AppState,
    kind: VocabularyKind,
) -> DomainResult<Vec<VocabularyEntry>> {
    state.vocabulary_repo.list_kind(kind).await
}

/// Move an option to a new position in its registry
pub async fn move_option(state: &AppState, id: u32, position: i32) -> DomainResult<()> {
    state.vocabulary_repo.move_entry(id, position).await
}
