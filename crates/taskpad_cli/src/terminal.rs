//! Line-oriented terminal implementation of `UserInterface`.

use std::io::{self, BufRead, Write};
use taskpad_core::{Frame, Notice, UserInterface};

/// Prompt answer that clears the field instead of keeping it.
pub const CLEAR_ANSWER: &str = "-";

/// Keeps only the latest frame; each render replaces the previous one and
/// the host prints it once the command is done.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
    frame: Option<Frame>,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
            frame: None,
        }
    }

    /// Answers every confirmation with yes without reading input.
    pub fn assume_yes(&mut self, value: bool) {
        self.assume_yes = value;
    }

    /// Reads one line without its terminator; `None` on EOF or read error.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed_len);
                Some(line)
            }
        }
    }

    /// Prints the latest frame, if one was rendered since the last call.
    pub fn print_frame(&mut self) -> io::Result<()> {
        if let Some(frame) = self.frame.take() {
            write!(self.output, "{frame}")?;
        }
        self.output.flush()
    }

    pub fn println(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        // A failed write still lets the user answer.
        let _ = write!(self.output, "{question} ");
        let _ = self.output.flush();
        self.read_line()
    }
}

impl<R: BufRead, W: Write> UserInterface for TerminalUi<R, W> {
    fn render(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(&format!("{message} [y/N]"))
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    /// Empty keeps `initial`, `-` clears the field, EOF cancels.
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String> {
        let answer = self.ask(&format!("{message} [{initial}]"))?;
        match answer.as_str() {
            "" => Some(initial.to_string()),
            CLEAR_ANSWER => Some(String::new()),
            _ => Some(answer),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        let _ = writeln!(self.output, "{notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalUi;
    use std::io::Cursor;
    use taskpad_core::{render_frame, Notice, UserInterface};

    fn ui(input: &str) -> TerminalUi<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalUi::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn confirm_accepts_only_explicit_yes() {
        let mut terminal = ui("y\nno\n\n");
        assert!(terminal.confirm("Delete?"));
        assert!(!terminal.confirm("Delete?"));
        assert!(!terminal.confirm("Delete?"));
        assert!(!terminal.confirm("Delete?"));
    }

    #[test]
    fn assume_yes_skips_input() {
        let mut terminal = ui("");
        terminal.assume_yes(true);
        assert!(terminal.confirm("Delete?"));
    }

    #[test]
    fn prompt_keeps_initial_on_empty_answer_and_cancels_on_eof() {
        let mut terminal = ui("\r\nRenamed\n");
        assert_eq!(terminal.prompt("Title:", "Old").as_deref(), Some("Old"));
        assert_eq!(
            terminal.prompt("Title:", "Old").as_deref(),
            Some("Renamed")
        );
        assert_eq!(terminal.prompt("Title:", "Old"), None);
    }

    #[test]
    fn dash_answer_clears_the_field() {
        let mut terminal = ui("-\n");
        assert_eq!(
            terminal.prompt("Edit project description:", "Ship v1").as_deref(),
            Some("")
        );
    }

    #[test]
    fn only_latest_frame_is_printed() {
        let mut terminal = ui("");
        terminal.render(&render_frame(&[], &[], "first"));
        terminal.render(&render_frame(&[], &[], "second"));
        terminal.notify(&Notice::NotesSaved);
        terminal.print_frame().unwrap();
        terminal.print_frame().unwrap();

        let printed = String::from_utf8(terminal.output.clone()).unwrap();
        assert!(printed.contains("Notes saved successfully!"));
        assert!(printed.contains("second"));
        assert!(!printed.contains("first"));
        assert_eq!(printed.matches("== Todos").count(), 1);
    }
}
