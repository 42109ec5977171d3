//! List/sidebar panel.
//!
//! # Responsibility
//! - Partition notes into active rows and a collapsible archive section.
//! - Track the single open per-row context menu.
//! - Route row clicks and menu actions to `NoteCommands`.
//!
//! # Invariants
//! - At most one row menu is open.
//! - Any menu action closes the menu before the command runs.
//! - The archive section starts collapsed.

use crate::model::note::{Note, NoteId};
use crate::service::note_store::{NoteCommands, StoreResult, StoreSnapshot};

/// Placeholder shown in an open archive section with no archived notes.
pub const ARCHIVE_EMPTY_LABEL: &str = "No archived notes";

/// Context-menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Archive,
    Unarchive,
    Delete,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Archive => "Archive",
            Self::Unarchive => "Unarchive",
            Self::Delete => "Delete",
        }
    }

    /// Entries offered for a row in the given partition.
    pub fn for_row(archived: bool) -> [MenuAction; 2] {
        if archived {
            [Self::Unarchive, Self::Delete]
        } else {
            [Self::Archive, Self::Delete]
        }
    }
}

/// Where a pointer-down landed, relative to the open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget<'a> {
    /// Inside the menu opened for this note.
    Menu(&'a str),
    /// Anywhere else.
    Outside,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub note_id: NoteId,
    pub label: String,
    pub selected: bool,
    pub archived: bool,
    /// Present only while this row's menu is open.
    pub menu: Option<[MenuAction; 2]>,
}

/// Rendered archive section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSection {
    pub open: bool,
    /// Empty while collapsed.
    pub rows: Vec<NoteRow>,
    pub empty_label: Option<&'static str>,
}

/// Full panel render model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPanelView {
    pub collapsed: bool,
    pub active: Vec<NoteRow>,
    pub archive: ArchiveSection,
}

/// Transient list-panel state.
#[derive(Debug, Clone, Default)]
pub struct ListPanel {
    menu_open_for: Option<NoteId>,
    archive_open: bool,
    collapsed: bool,
}

impl ListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_menu(&self) -> Option<&str> {
        self.menu_open_for.as_deref()
    }

    pub fn is_archive_open(&self) -> bool {
        self.archive_open
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Builds the render model. While collapsed, no rows are produced.
    pub fn view(&self, snapshot: &StoreSnapshot<'_>) -> ListPanelView {
        if self.collapsed {
            return ListPanelView {
                collapsed: true,
                active: Vec::new(),
                archive: ArchiveSection {
                    open: self.archive_open,
                    rows: Vec::new(),
                    empty_label: None,
                },
            };
        }

        let active = snapshot
            .active_notes()
            .map(|note| self.row(note, snapshot))
            .collect();

        let archive = if self.archive_open {
            let rows: Vec<NoteRow> = snapshot
                .archived_notes()
                .map(|note| self.row(note, snapshot))
                .collect();
            let empty_label = rows.is_empty().then_some(ARCHIVE_EMPTY_LABEL);
            ArchiveSection {
                open: true,
                rows,
                empty_label,
            }
        } else {
            ArchiveSection {
                open: false,
                rows: Vec::new(),
                empty_label: None,
            }
        };

        ListPanelView {
            collapsed: false,
            active,
            archive,
        }
    }

    /// Menu trigger: opens this row's menu, or closes it when already open.
    pub fn toggle_menu(&mut self, note_id: &str) {
        if self.menu_open_for.as_deref() == Some(note_id) {
            self.menu_open_for = None;
        } else {
            self.menu_open_for = Some(note_id.to_string());
        }
    }

    /// Closes the open menu unless the pointer landed inside it.
    pub fn pointer_down(&mut self, target: PointerTarget<'_>) {
        let Some(open_id) = self.menu_open_for.as_deref() else {
            return;
        };
        match target {
            PointerTarget::Menu(note_id) if note_id == open_id => {}
            _ => self.menu_open_for = None,
        }
    }

    pub fn toggle_archive(&mut self) {
        self.archive_open = !self.archive_open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Row click outside the menu trigger.
    pub fn select_row(
        &mut self,
        commands: &mut impl NoteCommands,
        note_id: &str,
    ) -> StoreResult<()> {
        commands.select(note_id)
    }

    /// "New Note" action.
    pub fn create_note(&mut self, commands: &mut impl NoteCommands) -> StoreResult<NoteId> {
        commands.create_note()
    }

    /// Runs a menu action for a row, closing the menu first.
    pub fn choose(
        &mut self,
        commands: &mut impl NoteCommands,
        note_id: &str,
        action: MenuAction,
    ) -> StoreResult<()> {
        self.menu_open_for = None;
        match action {
            MenuAction::Archive => commands.archive(note_id, true),
            MenuAction::Unarchive => commands.archive(note_id, false),
            MenuAction::Delete => commands.delete(note_id),
        }
    }

    fn row(&self, note: &Note, snapshot: &StoreSnapshot<'_>) -> NoteRow {
        let menu_open = self.menu_open_for.as_deref() == Some(note.id.as_str());
        NoteRow {
            note_id: note.id.clone(),
            label: note.display_title().to_string(),
            selected: snapshot.is_selected(&note.id),
            archived: note.archived,
            menu: menu_open.then(|| MenuAction::for_row(note.archived)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListPanel, MenuAction, PointerTarget};

    #[test]
    fn menu_toggle_keeps_at_most_one_open() {
        let mut panel = ListPanel::new();
        panel.toggle_menu("a");
        panel.toggle_menu("b");
        assert_eq!(panel.open_menu(), Some("b"));
        panel.toggle_menu("b");
        assert_eq!(panel.open_menu(), None);
    }

    #[test]
    fn pointer_inside_open_menu_keeps_it_open() {
        let mut panel = ListPanel::new();
        panel.toggle_menu("a");
        panel.pointer_down(PointerTarget::Menu("a"));
        assert_eq!(panel.open_menu(), Some("a"));
        panel.pointer_down(PointerTarget::Menu("b"));
        assert_eq!(panel.open_menu(), None);

        panel.toggle_menu("a");
        panel.pointer_down(PointerTarget::Outside);
        assert_eq!(panel.open_menu(), None);
    }

    #[test]
    fn menu_entries_depend_on_partition() {
        assert_eq!(
            MenuAction::for_row(false),
            [MenuAction::Archive, MenuAction::Delete]
        );
        assert_eq!(
            MenuAction::for_row(true),
            [MenuAction::Unarchive, MenuAction::Delete]
        );
    }

    #[test]
    fn archive_section_and_sidebar_start_collapsed_state() {
        let panel = ListPanel::new();
        assert!(!panel.is_archive_open());
        assert!(!panel.is_collapsed());
    }
}
