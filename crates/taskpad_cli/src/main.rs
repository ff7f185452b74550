//! Taskpad command-line host.
//!
//! # Responsibility
//! - Resolve storage and logging paths, then open one tracker session.
//! - Map each subcommand onto a single tracker action and print the frame.

mod cli;
mod notes_input;
mod terminal;
#[cfg(test)]
mod test_support;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{
    Cli, Command, CommentCommand, NotesCommand, PathArgs, ProjectCommand, TaskCommand,
    TodoCommand,
};
use directories::ProjectDirs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;
use taskpad_core::db::open_db;
use taskpad_core::{
    default_log_level, init_logging, KvStore, Outcome, SkipReason, SqliteKvStore, TaskRef,
    TrackerConfig, TrackerService,
};
use notes_input::ChannelLines;
use terminal::TerminalUi;

const DB_FILE_NAME: &str = "taskpad.sqlite3";

struct ResolvedPaths {
    db: PathBuf,
    log_dir: PathBuf,
    log_level: String,
}

impl ResolvedPaths {
    fn resolve(args: PathArgs) -> Self {
        let data_dir = ProjectDirs::from("", "", "taskpad")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("taskpad"));
        Self {
            db: args.db.unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            log_dir: args.log_dir.unwrap_or_else(|| data_dir.join("logs")),
            log_level: args
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = ResolvedPaths::resolve(cli.paths);

    // Logging is best-effort; the pad works without it.
    if let Err(err) = init_logging(&paths.log_level, &paths.log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Some(parent) = paths.db.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let conn = open_db(&paths.db)
        .with_context(|| format!("failed to open `{}`", paths.db.display()))?;
    let store = SqliteKvStore::try_new(&conn)?;

    // Stdin is locked per read so `notes edit` can hand it to a reader thread.
    let ui = TerminalUi::new(BufReader::new(io::stdin()), io::stdout());
    let mut service = TrackerService::open(store, ui, TrackerConfig::default());

    let print_frame = !matches!(cli.command, Command::Notes(NotesCommand::Show));
    let result = run(&mut service, cli.command);
    finish(service, print_frame)?;
    result
}

/// Prints the final frame and closes the session. The session is closed
/// before an output error is returned so a pending notes save still lands.
fn finish<S, R, W>(
    mut service: TrackerService<S, TerminalUi<R, W>>,
    print_frame: bool,
) -> io::Result<()>
where
    S: KvStore,
    R: BufRead,
    W: Write,
{
    let printed = if print_frame {
        service.ui_mut().print_frame()
    } else {
        Ok(())
    };
    service.close();
    printed
}

fn run<S, R, W>(service: &mut TrackerService<S, TerminalUi<R, W>>, command: Command) -> Result<()>
where
    S: KvStore,
    R: BufRead,
    W: Write,
{
    let outcome = match command {
        Command::Show => return Ok(()),
        Command::Todo(TodoCommand::Add { text }) => service.add_todo(&text),
        Command::Todo(TodoCommand::Toggle { index }) => service.toggle_todo(index),
        Command::Todo(TodoCommand::Rm { index }) => service.delete_todo(index),
        Command::Project(ProjectCommand::Add {
            title,
            description,
            status,
        }) => service.add_project(&title, &description, status),
        Command::Project(ProjectCommand::Edit { index }) => service.edit_project(index),
        Command::Project(ProjectCommand::Rm { index, yes }) => {
            service.ui_mut().assume_yes(yes);
            service.delete_project(index)
        }
        Command::Task(TaskCommand::Add { project, text }) => service.add_task(project, &text),
        Command::Task(TaskCommand::Toggle { project, task }) => {
            service.toggle_task(TaskRef::new(project, task))
        }
        Command::Comment(CommentCommand::Add { project, text }) => {
            service.add_comment(project, &text)
        }
        Command::Notes(NotesCommand::Show) => {
            let notes = service.entities().notes().to_string();
            service.ui_mut().println(&notes)?;
            return Ok(());
        }
        Command::Notes(NotesCommand::Save { text }) => {
            service.edit_notes(text, Instant::now());
            service.save_notes()
        }
        Command::Notes(NotesCommand::Edit) => {
            let mut lines = ChannelLines::spawn(io::stdin());
            notes_input::edit_notes(service, &mut lines, Instant::now);
            return Ok(());
        }
    };

    report(service, outcome)
}

fn report<S, R, W>(
    service: &mut TrackerService<S, TerminalUi<R, W>>,
    outcome: Outcome,
) -> Result<()>
where
    S: KvStore,
    R: BufRead,
    W: Write,
{
    match outcome {
        Outcome::Committed { .. } => Ok(()),
        Outcome::Cancelled => {
            service.ui_mut().println("Cancelled.")?;
            Ok(())
        }
        Outcome::Skipped(reason @ SkipReason::OutOfRange { .. }) => bail!("{reason}"),
        Outcome::Skipped(_) => Ok(()),
    }
}
