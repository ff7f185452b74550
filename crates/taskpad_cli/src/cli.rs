//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskpad_core::ProjectStatus;

#[derive(Debug, Parser)]
#[command(name = "taskpad", version, about = "Todos, projects and notes in one local pad")]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// SQLite database file holding the pad.
    #[arg(long, env = "TASKPAD_DB_PATH", global = true)]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKPAD_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files.
    #[arg(long, env = "TASKPAD_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every view and the summary.
    Show,
    #[command(subcommand)]
    Todo(TodoCommand),
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Comment(CommentCommand),
    #[command(subcommand)]
    Notes(NotesCommand),
}

#[derive(Debug, Subcommand)]
pub enum TodoCommand {
    Add { text: String },
    Toggle { index: usize },
    Rm { index: usize },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        description: String,
        /// planning|in-progress|completed
        #[arg(long, short, default_value = "planning")]
        status: ProjectStatus,
    },
    /// Prompts for a new title, then a new description. An empty answer
    /// keeps the current value, `-` clears it, EOF cancels.
    Edit { index: usize },
    Rm {
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add { project: usize, text: String },
    Toggle { project: usize, task: usize },
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    Add { project: usize, text: String },
}

#[derive(Debug, Subcommand)]
pub enum NotesCommand {
    /// Print the notes without the rest of the frame.
    Show,
    /// Replace the notes and save right away.
    Save { text: String },
    /// Replace the notes with stdin lines, one edit per line. A save fires
    /// after 2 s without input; EOF flushes the last edit.
    Edit,
}
