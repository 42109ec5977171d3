//! Presentation state for the two panels.
//!
//! Panels hold only transient UI state (open menu, collapsed sections). Note
//! data is read from a `StoreSnapshot` and changed through `NoteCommands`.

pub mod editor_panel;
pub mod list_panel;
