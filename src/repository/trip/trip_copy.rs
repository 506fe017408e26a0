//! Trip Copy Operations
//!
//! Cloning a trip as a fresh, fully unpacked packing list.

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, Trip};
use super::super::db::{not_initialized, now_millis};
use super::trip_repo::{insert_trip, select_trip};

/// Trait for trip copy operations
#[async_trait]
pub trait TripCopyOperations {
    /// Copy a trip and all its items under "Copy of {name}".
    ///
    /// The copy and its items get new ids; every copied item is unpacked.
    async fn duplicate_trip(&self, id: u32) -> DomainResult<Trip>;
}

#[async_trait]
impl TripCopyOperations for super::trip_repo::TripRepository {
    async fn duplicate_trip(&self, id: u32) -> DomainResult<Trip> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let source = select_trip(&tx, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trip {} not found", id)))?;
        let copy = insert_trip(&tx, &source.duplicate(now_millis()))?;
        tx.commit()?;

        log::info!("Duplicated trip {} into {} ({} items)", id, copy.id, copy.items.len());
        Ok(copy)
    }
}
