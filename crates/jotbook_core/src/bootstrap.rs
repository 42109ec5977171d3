//! Application bootstrap.
//!
//! # Responsibility
//! - Open durable storage and load the note store from `AppConfig`.
//! - Assemble the store with both panels.
//! - Mount the offline-cache glue.

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::db::{open_db, DbError};
use crate::offline::{
    register_offline_glue, CacheInspector, OfflineRegistrar, UpdatePrompt, UpdateTrigger,
};
use crate::repo::kv_repo::{RepoError, SqliteKeyValueStore};
use crate::repo::note_state_repo::{KvNoteStateRepository, NoteStateRepository};
use crate::service::note_store::{NoteStore, StoreError};
use crate::ui::editor_panel::EditorPanel;
use crate::ui::list_panel::ListPanel;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Store type used by the on-disk application.
pub type SqliteNoteStore = NoteStore<KvNoteStateRepository<SqliteKeyValueStore>, SystemClock>;

#[derive(Debug)]
pub enum BootstrapError {
    Db(DbError),
    Repo(RepoError),
    Store(StoreError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "failed to open note database: {err}"),
            Self::Repo(err) => write!(f, "failed to prepare note storage: {err}"),
            Self::Store(err) => write!(f, "failed to load notes: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for BootstrapError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for BootstrapError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Mounted UI tree: the store plus both panels.
pub struct App<R: NoteStateRepository, C: Clock = SystemClock> {
    pub store: NoteStore<R, C>,
    pub list_panel: ListPanel,
    pub editor_panel: EditorPanel,
    update_trigger: Option<UpdateTrigger>,
}

impl App<KvNoteStateRepository<SqliteKeyValueStore>, SystemClock> {
    /// Opens the configured SQLite database and loads the store.
    pub fn open(config: &AppConfig) -> Result<Self, BootstrapError> {
        let conn = open_db(&config.db_path)?;
        let repo = KvNoteStateRepository::new(SqliteKeyValueStore::try_new(conn)?);
        let store = NoteStore::load(repo, SystemClock, config.store)?;
        info!(
            "event=app_mount module=bootstrap status=ok db_path={}",
            config.db_path.display()
        );
        Ok(Self::mount(store, config))
    }
}

impl<R: NoteStateRepository, C: Clock> App<R, C> {
    /// Wraps an already loaded store.
    pub fn mount(store: NoteStore<R, C>, config: &AppConfig) -> Self {
        Self {
            store,
            list_panel: ListPanel::new(),
            editor_panel: EditorPanel::new(config.title_max_chars),
            update_trigger: None,
        }
    }

    /// Registers offline callbacks. Returns whether the platform accepted them.
    pub fn register_offline(
        &mut self,
        registrar: &mut dyn OfflineRegistrar,
        prompt: Rc<dyn UpdatePrompt>,
        inspector: Rc<dyn CacheInspector>,
    ) -> bool {
        self.update_trigger = register_offline_glue(registrar, prompt, inspector);
        self.update_trigger.is_some()
    }

    /// Update trigger returned by the platform, if registration succeeded.
    pub fn update_trigger(&self) -> Option<&UpdateTrigger> {
        self.update_trigger.as_ref()
    }
}
