//! Core domain logic for Goaltrack.
//! This crate is the single source of truth for objective invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;
pub mod view;

pub use config::AppConfig;
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::form::{FormError, FormField, ObjectiveDraft, ObjectiveForm};
pub use model::objective::{Objective, ObjectiveId};
pub use model::preferences::DisplayPreferences;
pub use progress::{
    daily_progress_needed, days_remaining, progress_percent, Clock, FixedClock, SystemClock,
};
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use repo::objective_repo::{KvObjectiveRepository, ObjectiveRepository};
pub use repo::preference_repo::{KvPreferenceRepository, PreferenceRepository};
pub use service::objective_service::{
    ConfirmPrompt, ObjectiveService, ObjectiveServiceError, ServiceResult,
};
pub use service::preference_service::PreferenceService;
pub use view::card::{build_cards, CardListView, ObjectiveCard};
pub use view::form_view::{FormMode, FormView};
pub use view::text::TextBoardView;
pub use view::{NullView, ObjectiveListView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
