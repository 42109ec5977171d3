//! Plain-text rendering of the panel views.

use jotbook_core::{EditorView, ListPanelView, NoteRow};
use std::fmt::Write;

pub fn render(list: &ListPanelView, editor: &EditorView) -> String {
    let mut out = String::new();
    render_list(&mut out, list);
    out.push('\n');
    render_editor(&mut out, editor);
    out
}

fn render_list(out: &mut String, list: &ListPanelView) {
    out.push_str("[+ New Note]\n");
    if list.collapsed {
        out.push_str("(sidebar collapsed)\n");
        return;
    }

    let mut number = 0;
    for row in &list.active {
        number += 1;
        render_row(out, number, row);
    }

    let arrow = if list.archive.open { 'v' } else { '>' };
    let _ = writeln!(out, "{arrow} Archive");
    for row in &list.archive.rows {
        number += 1;
        render_row(out, number, row);
    }
    if let Some(label) = list.archive.empty_label {
        let _ = writeln!(out, "    {label}");
    }
}

fn render_row(out: &mut String, number: usize, row: &NoteRow) {
    let marker = if row.selected { '*' } else { ' ' };
    let indent = if row.archived { "  " } else { "" };
    let short_id: String = row.note_id.chars().take(8).collect();
    let _ = writeln!(
        out,
        "{indent}{marker}{number:>3}. {label}  [{short_id}]",
        label = row.label
    );
    if let Some(actions) = row.menu {
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let _ = writeln!(out, "{indent}       ( {} )", labels.join(" | "));
    }
}

fn render_editor(out: &mut String, editor: &EditorView) {
    let title = if editor.title.is_empty() {
        format!("<{}>", editor.title_placeholder)
    } else {
        editor.title.clone()
    };
    let _ = writeln!(
        out,
        "Title ({}/{}): {title}",
        editor.title.chars().count(),
        editor.title_max_chars
    );
    out.push_str("----\n");
    if editor.body.is_empty() {
        let _ = writeln!(out, "<{}>", editor.body_placeholder);
    } else {
        out.push_str(&editor.body);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use jotbook_core::ui::list_panel::ArchiveSection;
    use jotbook_core::{EditorView, ListPanelView, MenuAction, NoteRow};

    #[test]
    fn renders_selection_menu_and_placeholders() {
        let list = ListPanelView {
            collapsed: false,
            active: vec![NoteRow {
                note_id: "0123456789".to_string(),
                label: "Groceries".to_string(),
                selected: true,
                archived: false,
                menu: Some(MenuAction::for_row(false)),
            }],
            archive: ArchiveSection {
                open: true,
                rows: Vec::new(),
                empty_label: Some("No archived notes"),
            },
        };
        let editor = EditorView {
            has_note: true,
            title: String::new(),
            body: String::new(),
            title_placeholder: "Add Title",
            body_placeholder: "start typing....",
            title_max_chars: 40,
        };

        let text = render(&list, &editor);
        assert!(text.contains("*  1. Groceries  [01234567]"));
        assert!(text.contains("( Archive | Delete )"));
        assert!(text.contains("v Archive"));
        assert!(text.contains("No archived notes"));
        assert!(text.contains("Title (0/40): <Add Title>"));
        assert!(text.contains("<start typing....>"));
    }
}
