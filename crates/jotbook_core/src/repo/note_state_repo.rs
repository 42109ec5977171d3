//! Persistence adapter for the note list and selection pointer.
//!
//! # Responsibility
//! - Serialize the note list to JSON under `notes`.
//! - Store the selected note id as a plain string under `selectedNoteId`.
//!
//! # Invariants
//! - A malformed `notes` value is copied to `notes.corrupt`, logged, and
//!   reported as absent.
//! - A blank `selectedNoteId` value is reported as absent.
//! - Logs carry counts and keys only, never note text.

use crate::model::note::Note;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::{debug, warn};

/// Key holding the JSON note array.
pub const NOTES_KEY: &str = "notes";
/// Key holding the last non-null selection.
pub const SELECTED_NOTE_ID_KEY: &str = "selectedNoteId";
/// Key holding the last unreadable `notes` payload, kept for recovery.
pub const CORRUPT_NOTES_KEY: &str = "notes.corrupt";

/// Repository interface for note-list state.
pub trait NoteStateRepository {
    /// Loads persisted notes; `None` when absent or unreadable.
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>>;
    /// Replaces the persisted note list.
    fn save_notes(&self, notes: &[Note]) -> RepoResult<()>;
    /// Loads the persisted selection; `None` when never stored.
    fn load_selected_id(&self) -> RepoResult<Option<String>>;
    /// Replaces the persisted selection.
    fn save_selected_id(&self, note_id: &str) -> RepoResult<()>;
}

/// `NoteStateRepository` over any `KeyValueStore`.
pub struct KvNoteStateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvNoteStateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> NoteStateRepository for KvNoteStateRepository<S> {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        let Some(raw) = self.store.get(NOTES_KEY)? else {
            debug!("event=notes_load module=repo status=absent key={NOTES_KEY}");
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                debug!(
                    "event=notes_load module=repo status=ok key={NOTES_KEY} count={}",
                    notes.len()
                );
                Ok(Some(notes))
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error key={NOTES_KEY} error_code=malformed_json line={} column={} bytes={}",
                    err.line(),
                    err.column(),
                    raw.len()
                );
                self.store.set(CORRUPT_NOTES_KEY, &raw)?;
                Ok(None)
            }
        }
    }

    fn save_notes(&self, notes: &[Note]) -> RepoResult<()> {
        let raw = serde_json::to_string(notes)?;
        self.store.set(NOTES_KEY, &raw)?;
        debug!(
            "event=notes_save module=repo status=ok key={NOTES_KEY} count={}",
            notes.len()
        );
        Ok(())
    }

    fn load_selected_id(&self) -> RepoResult<Option<String>> {
        let value = self
            .store
            .get(SELECTED_NOTE_ID_KEY)?
            .filter(|value| !value.trim().is_empty());
        Ok(value)
    }

    fn save_selected_id(&self, note_id: &str) -> RepoResult<()> {
        self.store.set(SELECTED_NOTE_ID_KEY, note_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        KvNoteStateRepository, NoteStateRepository, CORRUPT_NOTES_KEY, NOTES_KEY,
        SELECTED_NOTE_ID_KEY,
    };
    use crate::model::note::Note;
    use crate::repo::kv_repo::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn malformed_notes_are_reported_as_absent_and_kept_aside() {
        let kv = MemoryKeyValueStore::new();
        kv.set(NOTES_KEY, "[{not json").unwrap();
        let repo = KvNoteStateRepository::new(kv.clone());
        assert_eq!(repo.load_notes().unwrap(), None);
        assert_eq!(
            kv.get(CORRUPT_NOTES_KEY).unwrap().as_deref(),
            Some("[{not json")
        );
    }

    #[test]
    fn notes_and_selection_round_trip() {
        let repo = KvNoteStateRepository::new(MemoryKeyValueStore::new());
        let notes = vec![Note::with_id("a", "Title", "Body", 5)];
        repo.save_notes(&notes).unwrap();
        repo.save_selected_id("a").unwrap();

        assert_eq!(repo.load_notes().unwrap(), Some(notes));
        assert_eq!(repo.load_selected_id().unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn blank_selection_is_absent() {
        let kv = MemoryKeyValueStore::new();
        kv.set(SELECTED_NOTE_ID_KEY, "  ").unwrap();
        let repo = KvNoteStateRepository::new(kv);
        assert_eq!(repo.load_selected_id().unwrap(), None);
    }
}
