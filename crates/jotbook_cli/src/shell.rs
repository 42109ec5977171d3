//! Shell command grammar.
//!
//! One command per line. Row arguments are either a 1-based row number from
//! the last rendered list or a note id prefix.

use jotbook_core::ListPanelView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Title(String),
    Body(String),
    Select(String),
    Menu(String),
    Archive(String),
    Unarchive(String),
    Delete(String),
    ClickOutside,
    ToggleArchive,
    ToggleSidebar,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new                     create a note (reuses an empty one)
  title <text>            replace the selected note's title
  body <text>             replace the selected note's body (\\n for newline)
  select <row>            select a note by row number, else by id prefix
  menu <row>              open/close the row menu
  archive <row>           archive a note
  unarchive <row>         unarchive a note
  delete <row>            delete a note permanently
  click-outside           close an open row menu
  toggle-archive          show/hide the archive section
  toggle-sidebar          collapse/expand the note list
  show                    redraw both panels
  help                    this text
  quit                    exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };

    let row = |name: &str| -> Result<String, String> {
        let arg = rest.trim();
        if arg.is_empty() {
            Err(format!("`{name}` needs a row number or note id"))
        } else {
            Ok(arg.to_string())
        }
    };

    let command = match verb {
        "new" => Command::New,
        "title" => Command::Title(rest.to_string()),
        "body" => Command::Body(rest.replace("\\n", "\n")),
        "select" => Command::Select(row("select")?),
        "menu" => Command::Menu(row("menu")?),
        "archive" => Command::Archive(row("archive")?),
        "unarchive" => Command::Unarchive(row("unarchive")?),
        "delete" => Command::Delete(row("delete")?),
        "click-outside" => Command::ClickOutside,
        "toggle-archive" => Command::ToggleArchive,
        "toggle-sidebar" => Command::ToggleSidebar,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

/// Resolves a row argument against the rendered list.
///
/// Rows are numbered across the active list, then the open archive section.
/// A number outside that range is tried as an id prefix instead.
pub fn resolve_row(view: &ListPanelView, arg: &str) -> Option<String> {
    let rows = view.active.iter().chain(view.archive.rows.iter());

    let by_number = arg
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| rows.clone().nth(index));
    if let Some(row) = by_number {
        return Some(row.note_id.clone());
    }

    let mut matches = rows.filter(|row| row.note_id.starts_with(arg));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.note_id.clone())
}
