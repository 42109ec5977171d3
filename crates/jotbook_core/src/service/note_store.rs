//! Note store: in-memory source of truth for the note list and selection.
//!
//! # Responsibility
//! - Load persisted state and apply the first-run policy.
//! - Implement create/edit/select/archive/delete semantics.
//! - Persist after every mutation and notify subscribers.
//!
//! # Invariants
//! - `notes` is sorted by `last_edited` descending after every mutation.
//! - Archiving or deleting the selected note clears the selection.
//! - A null selection is never written to storage.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{sort_by_last_edited, Note, NoteId};
use crate::repo::kv_repo::RepoError;
use crate::repo::note_state_repo::NoteStateRepository;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error. In-memory state is already updated when a persistence
/// write fails.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "note storage failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What to do when no note list has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstRunPolicy {
    /// Seed one "Getting Started" note.
    #[default]
    Welcome,
    /// Start with an empty list.
    Empty,
}

impl FirstRunPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Empty => "empty",
        }
    }
}

impl FromStr for FirstRunPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "welcome" => Ok(Self::Welcome),
            "empty" => Ok(Self::Empty),
            other => Err(format!(
                "unsupported first-run policy `{other}`; expected welcome|empty"
            )),
        }
    }
}

/// Behavior switches for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub first_run: FirstRunPolicy,
    /// Select an existing blank, unarchived note instead of creating another.
    pub reuse_empty_note: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            first_run: FirstRunPolicy::Welcome,
            reuse_empty_note: true,
        }
    }
}

/// Read-only view of store state handed to panels and subscribers.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub notes: &'a [Note],
    pub selected_id: Option<&'a str>,
}

impl<'a> StoreSnapshot<'a> {
    pub fn selected_note(&self) -> Option<&'a Note> {
        let notes = self.notes;
        let selected_id = self.selected_id?;
        notes.iter().find(|note| note.id == selected_id)
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &'a Note> + 'a {
        let notes = self.notes;
        notes.iter().filter(|note| !note.archived)
    }

    pub fn archived_notes(&self) -> impl Iterator<Item = &'a Note> + 'a {
        let notes = self.notes;
        notes.iter().filter(|note| note.archived)
    }

    pub fn is_selected(&self, note_id: &str) -> bool {
        self.selected_id == Some(note_id)
    }
}

/// Commands panels may invoke on the store.
pub trait NoteCommands {
    /// Creates (or reuses) a blank note and selects it. Returns the selected id.
    fn create_note(&mut self) -> StoreResult<NoteId>;
    fn set_title(&mut self, title: &str) -> StoreResult<()>;
    fn set_body(&mut self, body: &str) -> StoreResult<()>;
    fn select(&mut self, note_id: &str) -> StoreResult<()>;
    fn archive(&mut self, note_id: &str, archive: bool) -> StoreResult<()>;
    fn delete(&mut self, note_id: &str) -> StoreResult<()>;
}

/// Handle returned by `NoteStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreSnapshot<'_>)>;

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Body,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
        }
    }
}

/// Note list owner.
pub struct NoteStore<R: NoteStateRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    options: StoreOptions,
    notes: Vec<Note>,
    selected_id: Option<NoteId>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<R: NoteStateRepository, C: Clock> NoteStore<R, C> {
    /// Loads persisted state, seeding per `options.first_run` when none exists.
    ///
    /// The stored selection is kept only when it references an unarchived
    /// note; otherwise the first unarchived note (if any) is selected. The
    /// resulting list, and a non-null selection, are written back.
    pub fn load(repo: R, clock: C, options: StoreOptions) -> StoreResult<Self> {
        let (mut notes, seeded) = match repo.load_notes()? {
            Some(notes) => (notes, false),
            None => match options.first_run {
                FirstRunPolicy::Welcome => (vec![Note::welcome(clock.now_ms())], true),
                FirstRunPolicy::Empty => (Vec::new(), true),
            },
        };
        sort_by_last_edited(&mut notes);

        let stored_selection = repo.load_selected_id()?;
        let selected_id = match stored_selection {
            Some(id) if notes.iter().any(|note| note.id == id && !note.archived) => Some(id),
            stale => {
                if let Some(id) = stale {
                    debug!("event=store_load module=store status=stale_selection note_id={id}");
                }
                notes
                    .iter()
                    .find(|note| !note.archived)
                    .map(|note| note.id.clone())
            }
        };

        let store = Self {
            repo,
            clock,
            options,
            notes,
            selected_id,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        store.persist_notes()?;
        store.persist_selection()?;

        info!(
            "event=store_load module=store status=ok seeded={} first_run={} count={} selected={}",
            seeded,
            options.first_run.as_str(),
            store.notes.len(),
            store.selected_id.is_some()
        );
        Ok(store)
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            notes: &self.notes,
            selected_id: self.selected_id.as_deref(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.snapshot().selected_note()
    }

    /// Registers a listener called with the new snapshot after every mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreSnapshot<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(current, _)| *current != id);
        self.listeners.len() != before
    }

    fn edit_selected(&mut self, field: Field, text: &str) -> StoreResult<()> {
        let now = self.clock.now_ms();

        // A selection pointing at no listed note behaves like no selection.
        let existing = self
            .selected_id
            .as_deref()
            .and_then(|id| self.notes.iter().position(|note| note.id == id));

        let Some(index) = existing else {
            let note = match field {
                Field::Title => Note::new(text, "", now),
                Field::Body => Note::new("", text, now),
            };
            info!(
                "event=note_create module=store status=ok trigger=edit_{} note_id={} replaced_dangling={}",
                field.label(),
                note.id,
                self.selected_id.is_some()
            );
            self.selected_id = Some(note.id.clone());
            self.notes.push(note);
            sort_by_last_edited(&mut self.notes);
            return self.finish(true, true);
        };

        let note = &mut self.notes[index];
        match field {
            Field::Title => note.title = text.to_string(),
            Field::Body => note.body = text.to_string(),
        }
        note.last_edited = now;
        debug!(
            "event=note_edit module=store status=ok field={} note_id={} chars={}",
            field.label(),
            note.id,
            text.chars().count()
        );
        sort_by_last_edited(&mut self.notes);
        self.finish(true, false)
    }

    /// Persists the requested pieces, then notifies subscribers even when a
    /// write failed.
    fn finish(&mut self, notes_changed: bool, selection_changed: bool) -> StoreResult<()> {
        let mut result = Ok(());
        if notes_changed {
            result = self.persist_notes();
        }
        if selection_changed && result.is_ok() {
            result = self.persist_selection();
        }
        self.notify();
        result
    }

    fn persist_notes(&self) -> StoreResult<()> {
        self.repo.save_notes(&self.notes)?;
        Ok(())
    }

    fn persist_selection(&self) -> StoreResult<()> {
        if let Some(selected_id) = self.selected_id.as_deref() {
            self.repo.save_selected_id(selected_id)?;
        }
        Ok(())
    }

    fn notify(&mut self) {
        let snapshot = StoreSnapshot {
            notes: &self.notes,
            selected_id: self.selected_id.as_deref(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl<R: NoteStateRepository, C: Clock> NoteCommands for NoteStore<R, C> {
    fn create_note(&mut self) -> StoreResult<NoteId> {
        if self.options.reuse_empty_note {
            let blank = self
                .notes
                .iter()
                .find(|note| !note.archived && note.is_blank())
                .map(|note| note.id.clone());
            if let Some(blank_id) = blank {
                info!("event=note_create module=store status=reused note_id={blank_id}");
                self.selected_id = Some(blank_id.clone());
                self.finish(false, true)?;
                return Ok(blank_id);
            }
        }

        let note = Note::new("", "", self.clock.now_ms());
        let note_id = note.id.clone();
        info!("event=note_create module=store status=ok trigger=create note_id={note_id}");
        self.notes.push(note);
        sort_by_last_edited(&mut self.notes);
        self.selected_id = Some(note_id.clone());
        self.finish(true, true)?;
        Ok(note_id)
    }

    fn set_title(&mut self, title: &str) -> StoreResult<()> {
        self.edit_selected(Field::Title, title)
    }

    fn set_body(&mut self, body: &str) -> StoreResult<()> {
        self.edit_selected(Field::Body, body)
    }

    fn select(&mut self, note_id: &str) -> StoreResult<()> {
        debug!("event=note_select module=store status=ok note_id={note_id}");
        self.selected_id = Some(note_id.to_string());
        self.finish(false, true)
    }

    fn archive(&mut self, note_id: &str, archive: bool) -> StoreResult<()> {
        let found = match self.notes.iter_mut().find(|note| note.id == note_id) {
            Some(note) => {
                note.archived = archive;
                true
            }
            None => false,
        };
        if archive && self.selected_id.as_deref() == Some(note_id) {
            self.selected_id = None;
        }
        info!(
            "event=note_archive module=store status={} note_id={} archived={}",
            if found { "ok" } else { "not_found" },
            note_id,
            archive
        );
        self.finish(true, false)
    }

    fn delete(&mut self, note_id: &str) -> StoreResult<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != note_id);
        if self.selected_id.as_deref() == Some(note_id) {
            self.selected_id = None;
        }
        info!(
            "event=note_delete module=store status={} note_id={}",
            if self.notes.len() < before { "ok" } else { "not_found" },
            note_id
        );
        self.finish(true, false)
    }
}
