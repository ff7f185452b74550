//! Shared helpers for host tests.

use crate::terminal::TerminalUi;
use std::cell::RefCell;
use std::io::{Cursor, Write};
use std::rc::Rc;
use taskpad_core::{KvStore, MemoryKvStore, StoreResult};

pub fn terminal<W: Write>(input: &str, output: W) -> TerminalUi<Cursor<Vec<u8>>, W> {
    TerminalUi::new(Cursor::new(input.as_bytes().to_vec()), output)
}

/// Write history shared with a `RecordingStore` after it moves into a session.
#[derive(Debug, Clone, Default)]
pub struct WriteLog(Rc<RefCell<Vec<(String, String)>>>);

impl WriteLog {
    /// Every value written under `key`, oldest first.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|(written, _)| written == key)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryKvStore,
    log: WriteLog,
}

impl RecordingStore {
    /// Seeds a value without recording it as a write.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.inner
            .set(key, value)
            .expect("memory store accepts every write");
        self
    }

    pub fn writes(&self) -> WriteLog {
        self.log.clone()
    }
}

impl KvStore for RecordingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.log
            .0
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        self.inner.set(key, value)
    }
}

/// Output sink whose every write fails, like a closed pipe.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}
