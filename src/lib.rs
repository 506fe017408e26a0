//! PackFast Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - sections: Pure derivation of grouped display sections
//! - commands: Operation handlers for a UI layer

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod sections;
pub mod seeder;

use config::Config;
use domain::DomainResult;
use repository::{init_db, DbState, ItemRepository, TripRepository, VocabularyRepository};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub trip_repo: TripRepository,
    pub item_repo: ItemRepository,
    pub vocabulary_repo: VocabularyRepository,
}

impl AppState {
    /// Wire repositories onto an initialized database
    pub fn new(db_state: DbState) -> Self {
        let conn = db_state.conn.clone();
        Self {
            trip_repo: TripRepository::new(conn.clone()),
            item_repo: ItemRepository::new(conn.clone()),
            vocabulary_repo: VocabularyRepository::new(conn),
            db_state,
        }
    }

    /// Start logging, open the database and seed defaults per `config`
    pub async fn open(config: &Config) -> DomainResult<Self> {
        if let Some(log_dir) = &config.log_dir {
            // Logging is best effort; the store is usable without it
            if let Err(e) = rolling_logger::init_logger(log_dir, &config.app_name) {
                let now = chrono::Local::now().format("%H:%M:%S%.3f");
                eprintln!("[{}] Logger init failed: {}", now, e);
            }
        }

        let db_state = match init_db(&config.db_path).await {
            Ok(db_state) => db_state,
            Err(e) => {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                return Err(e);
            }
        };
        let state = Self::new(db_state);

        if config.seed_defaults {
            seeder::seed_if_needed(&state.vocabulary_repo).await?;
        }

        let _ = rolling_logger::info(&format!("{} core ready", config.app_name));
        Ok(state)
    }
}
