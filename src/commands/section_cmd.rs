//! Commands deriving display sections

use crate::domain::DomainResult;
use crate::repository::Repository;
use crate::sections::{build_sections, Filters, Grouping, Sections, Vocabularies};
use crate::AppState;

/// Current display order of every registry
pub async fn registry_order(state: &AppState) -> DomainResult<Vocabularies> {
    let entries = state.vocabulary_repo.list().await?;
    Ok(Vocabularies::from_entries(&entries))
}

/// Sections for one trip's items, read fresh from the store
pub async fn trip_sections(
    state: &AppState,
    trip_id: u32,
    grouping: Grouping,
    filters: &Filters,
) -> DomainResult<Sections> {
    let trip = super::trip_cmd::require_trip(state, trip_id).await?;
    let vocab = registry_order(state).await?;
    Ok(build_sections(&trip.items, grouping, filters, &vocab))
}
