//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted under the `notes` key.
//! - Provide ordering and emptiness helpers used by the store policies.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - `last_edited` is epoch milliseconds and only moves on title/body edits.
//! - `archived` is omitted from JSON when false and defaults to false when
//!   absent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier.
///
/// New notes get a v4 UUID string, but any non-empty string loaded from
/// storage is accepted as-is.
pub type NoteId = String;

/// Soft cap applied by the editor to title input.
pub const TITLE_MAX_CHARS: usize = 40;

/// Label shown for notes whose title is empty or whitespace-only.
pub const UNTITLED_LABEL: &str = "Untitled Note";

/// Title of the note seeded on first run.
pub const WELCOME_TITLE: &str = "Getting Started";

/// Body of the note seeded on first run.
pub const WELCOME_BODY: &str = "Welcome to JotBook!

Here are a few tips to get you started:
- Use the New Note action to create a note.
- Start writing a note. Changes are saved automatically.
- Use the row menu to access archive or delete options.
- Archived notes are available under \"Archive\" and can be unarchived from the row menu.

This app works offline and stores your notes locally so they stay between sessions.
Enjoy taking notes!";

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Epoch milliseconds of the last title/body edit.
    pub last_edited: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
}

impl Note {
    /// Creates an unarchived note with a freshly generated id.
    pub fn new(title: impl Into<String>, body: impl Into<String>, last_edited: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, body, last_edited)
    }

    /// Creates an unarchived note with a caller-provided id.
    pub fn with_id(
        id: impl Into<NoteId>,
        title: impl Into<String>,
        body: impl Into<String>,
        last_edited: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            last_edited,
            archived: false,
        }
    }

    /// Builds the onboarding note seeded on first run.
    pub fn welcome(now_ms: i64) -> Self {
        Self::new(WELCOME_TITLE, WELCOME_BODY, now_ms)
    }

    /// Returns whether both title and body are blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    /// Returns the list label, falling back for blank titles.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_LABEL
        } else {
            self.title.as_str()
        }
    }
}

/// Sorts notes by `last_edited` descending.
///
/// The sort is stable, so notes with equal timestamps keep their relative
/// order.
pub fn sort_by_last_edited(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
}

/// Truncates `text` to at most `max_chars` characters.
pub fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::{clamp_chars, sort_by_last_edited, Note, UNTITLED_LABEL};

    #[test]
    fn json_shape_uses_camel_case_and_omits_false_archive_flag() {
        let note = Note::with_id("n1", "t", "b", 42);
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"id":"n1","title":"t","body":"b","lastEdited":42}"#);

        let mut archived = note.clone();
        archived.archived = true;
        let json = serde_json::to_string(&archived).unwrap();
        assert!(json.contains(r#""archived":true"#));
    }

    #[test]
    fn missing_archive_flag_defaults_to_false() {
        let note: Note =
            serde_json::from_str(r#"{"id":"1700000000000","title":"","body":"x","lastEdited":7}"#)
                .unwrap();
        assert_eq!(note.id, "1700000000000");
        assert!(!note.archived);
    }

    #[test]
    fn sort_is_descending_and_stable_for_ties() {
        let mut notes = vec![
            Note::with_id("a", "", "", 100),
            Note::with_id("b", "", "", 300),
            Note::with_id("c", "", "", 100),
        ];
        sort_by_last_edited(&mut notes);
        let ids: Vec<&str> = notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn display_title_falls_back_for_whitespace() {
        assert_eq!(Note::with_id("x", "   ", "", 0).display_title(), UNTITLED_LABEL);
        assert_eq!(Note::with_id("x", "Plan", "", 0).display_title(), "Plan");
    }

    #[test]
    fn blank_check_trims_both_fields() {
        assert!(Note::with_id("x", " ", "\n", 0).is_blank());
        assert!(!Note::with_id("x", "", "body", 0).is_blank());
    }

    #[test]
    fn clamp_chars_counts_characters_not_bytes() {
        assert_eq!(clamp_chars("héllo", 2), "hé");
        assert_eq!(clamp_chars("abc", 10), "abc");
    }
}
