//! Plain-text rendering of a frame for terminal hosts.

use super::frame::{Frame, ProjectCard, Region};
use chrono::Local;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let summary = &self.summary.summary;
        writeln!(
            f,
            "Projects: {}  Pending: {}  Completed: {}  Progress: {}",
            summary.project_count,
            summary.pending_count,
            summary.completed_count,
            self.summary.progress_label
        )?;

        writeln!(f)?;
        writeln!(f, "== Todos")?;
        match &self.todos {
            Region::Empty(empty) => writeln!(f, "  {}", empty.message())?,
            Region::Items(rows) => {
                for row in rows {
                    writeln!(f, "  [{}] {} {}", row.index, checkbox(row.completed), row.text)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "== Projects")?;
        match &self.projects {
            Region::Empty(empty) => writeln!(f, "  {}", empty.message())?,
            Region::Items(cards) => {
                for card in cards {
                    write_project(f, card)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "== Notes")?;
        if self.notes.is_empty() {
            writeln!(f, "  (empty)")
        } else {
            for line in self.notes.lines() {
                writeln!(f, "  {line}")?;
            }
            Ok(())
        }
    }
}

fn write_project(f: &mut Formatter<'_>, card: &ProjectCard) -> FmtResult {
    writeln!(
        f,
        "  [{}] {} ({}) created {}",
        card.index,
        card.title,
        card.status_label,
        card.created_at.with_timezone(&Local).format("%Y-%m-%d")
    )?;
    if !card.description.is_empty() {
        writeln!(f, "      {}", card.description)?;
    }

    writeln!(f, "      Tasks:")?;
    match &card.tasks {
        Region::Empty(empty) => writeln!(f, "        {}", empty.message())?,
        Region::Items(rows) => {
            for row in rows {
                writeln!(
                    f,
                    "        [{}] {} {} ({})",
                    row.task_ref,
                    checkbox(row.completed),
                    row.text,
                    row.priority.as_str()
                )?;
            }
        }
    }

    writeln!(f, "      Comments:")?;
    match &card.comments {
        Region::Empty(empty) => writeln!(f, "        {}", empty.message())?,
        Region::Items(rows) => {
            for row in rows {
                writeln!(
                    f,
                    "        {} - {}",
                    row.posted_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    row.text
                )?;
            }
        }
    }
    Ok(())
}

fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}
