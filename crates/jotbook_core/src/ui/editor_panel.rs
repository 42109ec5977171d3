//! Editor panel bound to the selected note.
//!
//! Inputs are forwarded to the store on every change without buffering; the
//! title is clamped to `title_max_chars` first.

use crate::model::note::{clamp_chars, TITLE_MAX_CHARS};
use crate::service::note_store::{NoteCommands, StoreResult, StoreSnapshot};

pub const TITLE_PLACEHOLDER: &str = "Add Title";
pub const BODY_PLACEHOLDER: &str = "start typing....";

/// Editor render model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    /// Whether a note is selected. Inputs stay interactive either way.
    pub has_note: bool,
    pub title: String,
    pub body: String,
    pub title_placeholder: &'static str,
    pub body_placeholder: &'static str,
    pub title_max_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorPanel {
    title_max_chars: usize,
}

impl Default for EditorPanel {
    fn default() -> Self {
        Self::new(TITLE_MAX_CHARS)
    }
}

impl EditorPanel {
    pub fn new(title_max_chars: usize) -> Self {
        Self { title_max_chars }
    }

    pub fn view(&self, snapshot: &StoreSnapshot<'_>) -> EditorView {
        let selected = snapshot.selected_note();
        EditorView {
            has_note: selected.is_some(),
            title: selected.map(|note| note.title.clone()).unwrap_or_default(),
            body: selected.map(|note| note.body.clone()).unwrap_or_default(),
            title_placeholder: TITLE_PLACEHOLDER,
            body_placeholder: BODY_PLACEHOLDER,
            title_max_chars: self.title_max_chars,
        }
    }

    /// Title change. Text beyond the cap is dropped.
    pub fn input_title(&self, commands: &mut impl NoteCommands, text: &str) -> StoreResult<()> {
        commands.set_title(clamp_chars(text, self.title_max_chars))
    }

    pub fn input_body(&self, commands: &mut impl NoteCommands, text: &str) -> StoreResult<()> {
        commands.set_body(text)
    }
}
