//! Notes editing from a stream of lines.
//!
//! # Responsibility
//! - Feed each input line to the tracker as one notes edit.
//! - Wake up at the save deadline while input is idle so the debounced
//!   save fires without waiting for the next line.

use std::io::{BufRead, BufReader, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use taskpad_core::{KvStore, TrackerService, UserInterface};

/// Result of waiting for input up to an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    /// The deadline passed before a line arrived.
    Idle,
    Closed,
}

pub trait LineSource {
    /// Blocks until a line arrives, the input ends, or `deadline` passes.
    fn next_line(&mut self, deadline: Option<Instant>) -> LineEvent;
}

/// Reads lines on a background thread and hands them over a channel.
pub struct ChannelLines {
    rx: Receiver<String>,
}

impl ChannelLines {
    pub fn spawn<R: Read + Send + 'static>(input: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(input).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

impl LineSource for ChannelLines {
    fn next_line(&mut self, deadline: Option<Instant>) -> LineEvent {
        let received = match deadline {
            Some(deadline) => self
                .rx
                .recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => LineEvent::Line(line),
            Err(RecvTimeoutError::Timeout) => LineEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => LineEvent::Closed,
        }
    }
}

/// Replaces the notes with the incoming lines, one edit per line, until the
/// input closes. `now` is the clock used for the save window.
pub fn edit_notes<S, U, L, C>(service: &mut TrackerService<S, U>, lines: &mut L, mut now: C)
where
    S: KvStore,
    U: UserInterface,
    L: LineSource,
    C: FnMut() -> Instant,
{
    let mut notes = String::new();
    loop {
        match lines.next_line(service.next_deadline()) {
            LineEvent::Line(line) => {
                let at = now();
                // A save whose window already passed goes out before the edit replaces it.
                service.tick(at);
                if !notes.is_empty() {
                    notes.push('\n');
                }
                notes.push_str(&line);
                service.edit_notes(notes.clone(), at);
            }
            LineEvent::Idle => {
                service.tick(now());
            }
            LineEvent::Closed => break,
        }
    }
}
