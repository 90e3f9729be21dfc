//! Core logic for geopick: pick a person from an external directory and show
//! where their coordinates fall.
//! UI shells (FFI, CLI) only wire this crate to a screen.

pub mod config;
pub mod db;
pub mod directory;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use directory::client::{
    DirectoryClient, DirectoryError, DirectoryResult, HttpDirectoryClient, DEFAULT_BASE_URL,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::quadrant::{classify, classify_geo, Quadrant, QuadrantColor};
pub use model::record::{Address, Coordinate, Geo, Record, RecordId};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::picker_service::{FetchTicket, PickerService, SelectOutcome};
pub use service::picker_view::{
    LocationPanel, PickerView, UserOption, NOT_SELECTED_TEXT, SELECT_PROMPT_TEXT,
};
pub use service::selection_store::{SelectionStore, SELECTION_KEY};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
