//! Trip Repository Module
//!
//! - trip_repo: Core CRUD operations (trips load with their items)
//! - trip_copy: Trip duplication

mod trip_repo;
mod trip_copy;

pub use trip_repo::TripRepository;
pub use trip_copy::TripCopyOperations;
