//! Terminal front end for JotBook.
//!
//! # Responsibility
//! - Resolve configuration from flags and `JOTBOOK_*` environment variables.
//! - Mount the core app and drive its panels from line commands.

mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use jotbook_core::{
    init_logging, App, AppConfig, FirstRunPolicy, MenuAction, NoteStateRepository,
    PointerTarget, UnsupportedPlatform, UpdatePrompt,
};
use log::warn;
use shell::Command;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Parser)]
#[command(name = "jotbook", version, about = "Local notes in your terminal")]
struct Cli {
    /// SQLite file holding the notes.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// What to show on the very first start: welcome|empty
    #[arg(long)]
    first_run: Option<FirstRunPolicy>,
    /// Always create a new note, even when an empty one exists.
    #[arg(long)]
    no_reuse_empty: bool,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = AppConfig::from_env().context("invalid environment configuration")?;
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = Some(dir);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(policy) = self.first_run {
            config.store.first_run = policy;
        }
        if self.no_reuse_empty {
            config.store.reuse_empty_note = false;
        }
        Ok(config)
    }
}

/// Reads a yes/no answer from stdin.
struct TerminalPrompt;

impl UpdatePrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let mut app = App::open(&config)
        .with_context(|| format!("failed to open notes at {}", config.db_path.display()))?;
    let mut platform = UnsupportedPlatform;
    app.register_offline(
        &mut platform,
        Rc::new(TerminalPrompt),
        Rc::new(UnsupportedPlatform),
    );

    run_shell(&mut app)
}

fn run_shell<R: NoteStateRepository>(app: &mut App<R>) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let mut stdout = io::stdout();
    redraw(app, &mut stdout)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read command")?;

        let command = match shell::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                writeln!(stdout, "{}", shell::HELP)?;
                continue;
            }
            command => {
                if let Err(message) = apply(app, command) {
                    writeln!(stdout, "{message}")?;
                }
            }
        }
        redraw(app, &mut stdout)?;
    }
}

/// Runs one command against the app. Storage failures are reported to the
/// user and logged; the in-memory state is kept.
fn apply<R: NoteStateRepository>(app: &mut App<R>, command: Command) -> Result<(), String> {
    let view = app.list_panel.view(&app.store.snapshot());
    let row = |arg: &str| {
        shell::resolve_row(&view, arg).ok_or_else(|| format!("no unique row matches `{arg}`"))
    };

    let result = match command {
        Command::New => app.list_panel.create_note(&mut app.store).map(|_| ()),
        Command::Title(text) => app.editor_panel.input_title(&mut app.store, &text),
        Command::Body(text) => app.editor_panel.input_body(&mut app.store, &text),
        Command::Select(arg) => {
            let id = row(&arg)?;
            app.list_panel.pointer_down(PointerTarget::Outside);
            app.list_panel.select_row(&mut app.store, &id)
        }
        Command::Menu(arg) => {
            let id = row(&arg)?;
            app.list_panel.toggle_menu(&id);
            Ok(())
        }
        Command::Archive(arg) => {
            let id = row(&arg)?;
            app.list_panel.choose(&mut app.store, &id, MenuAction::Archive)
        }
        Command::Unarchive(arg) => {
            let id = row(&arg)?;
            app.list_panel.choose(&mut app.store, &id, MenuAction::Unarchive)
        }
        Command::Delete(arg) => {
            let id = row(&arg)?;
            app.list_panel.choose(&mut app.store, &id, MenuAction::Delete)
        }
        Command::ClickOutside => {
            app.list_panel.pointer_down(PointerTarget::Outside);
            Ok(())
        }
        Command::ToggleArchive => {
            app.list_panel.toggle_archive();
            Ok(())
        }
        Command::ToggleSidebar => {
            app.list_panel.toggle_sidebar();
            Ok(())
        }
        Command::Show | Command::Help | Command::Quit => Ok(()),
    };

    result.map_err(|err| {
        warn!("event=shell_command module=cli status=error error={err}");
        err.to_string()
    })
}

fn redraw<R: NoteStateRepository>(app: &App<R>, out: &mut impl Write) -> Result<()> {
    let snapshot = app.store.snapshot();
    let list = app.list_panel.view(&snapshot);
    let editor = app.editor_panel.view(&snapshot);
    write!(out, "{}", render::render(&list, &editor))?;
    out.flush()?;
    Ok(())
}
