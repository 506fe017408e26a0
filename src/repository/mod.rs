//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
pub mod item;
pub mod trip;
pub mod vocabulary;


pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection, IN_MEMORY};
pub use item::ItemRepository;
pub use trip::TripRepository;
pub use vocabulary::VocabularyRepository;
