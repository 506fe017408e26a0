//! Commands for trips

use crate::domain::{normalize_name, DomainError, DomainResult, Trip, TripStats};
use crate::repository::item::ItemTripOperations;
use crate::repository::trip::TripCopyOperations;
use crate::repository::Repository;
use crate::AppState;

/// Create an empty trip
pub async fn create_trip(state: &AppState, name: &str) -> DomainResult<Trip> {
    let name = normalize_name(name, "trip name")?;
    let trip = Trip::new(name, chrono::Utc::now().timestamp_millis());
    state.trip_repo.create(&trip).await
}

/// All trips with their items, newest first
pub async fn list_trips(state: &AppState) -> DomainResult<Vec<Trip>> {
    state.trip_repo.list().await
}

pub async fn get_trip(state: &AppState, id: u32) -> DomainResult<Option<Trip>> {
    state.trip_repo.find_by_id(id).await
}

pub async fn rename_trip(state: &AppState, id: u32, name: &str) -> DomainResult<Trip> {
    let name = normalize_name(name, "trip name")?;
    let mut trip = require_trip(state, id).await?;
    trip.name = name;
    state.trip_repo.update(&trip).await
}

/// Delete a trip and all of its items
pub async fn delete_trip(state: &AppState, id: u32) -> DomainResult<()> {
    state.trip_repo.delete(id).await
}

/// Copy a trip with all items unpacked
pub async fn duplicate_trip(state: &AppState, id: u32) -> DomainResult<Trip> {
    state.trip_repo.duplicate_trip(id).await
}

/// Mark every item of a trip unpacked, returning how many changed
pub async fn reset_trip(state: &AppState, id: u32) -> DomainResult<u32> {
    require_trip(state, id).await?;
    state.item_repo.reset_packed(id).await
}

/// Packed/total/progress, computed from the trip's current items
pub async fn trip_statistics(state: &AppState, id: u32) -> DomainResult<TripStats> {
    Ok(require_trip(state, id).await?.stats())
}

pub(super) async fn require_trip(state: &AppState, id: u32) -> DomainResult<Trip> {
    state
        .trip_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Trip {} not found", id)))
}
