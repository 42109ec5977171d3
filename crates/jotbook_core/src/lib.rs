//! Core domain logic for JotBook.
//! This crate is the single source of truth for note-list invariants; front
//! ends render its panel views and call its commands.

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod offline;
pub mod repo;
pub mod service;
pub mod ui;

pub use bootstrap::{App, BootstrapError, SqliteNoteStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, TITLE_MAX_CHARS, UNTITLED_LABEL};
pub use offline::{
    check_cache_status, register_offline_glue, CacheInspector, CacheListing, CacheStatus,
    OfflineCallbacks, OfflineError, OfflineRegistrar, UnsupportedPlatform, UpdatePrompt,
    UpdateTrigger,
};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::note_state_repo::{KvNoteStateRepository, NoteStateRepository};
pub use service::note_store::{
    FirstRunPolicy, NoteCommands, NoteStore, StoreError, StoreOptions, StoreResult,
    StoreSnapshot, SubscriptionId,
};
pub use ui::editor_panel::{EditorPanel, EditorView};
pub use ui::list_panel::{ListPanel, ListPanelView, MenuAction, NoteRow, PointerTarget};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
