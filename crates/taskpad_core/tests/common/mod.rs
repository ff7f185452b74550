#![allow(dead_code)]

use std::collections::VecDeque;
use taskpad_core::{Frame, KvStore, Notice, StoreError, StoreResult, UserInterface};

/// UI double that replays scripted answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    pub confirms: VecDeque<bool>,
    pub answers: VecDeque<Option<String>>,
    pub frames: Vec<Frame>,
    pub prompts: Vec<String>,
    pub notices: Vec<Notice>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn answer(mut self, answer: Option<&str>) -> Self {
        self.answers.push_back(answer.map(str::to_string));
        self
    }

    pub fn last_frame(&self) -> &Frame {
        self.frames.last().expect("at least one frame rendered")
    }
}

impl UserInterface for ScriptedUi {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, _initial: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Store whose writes always fail, for storage-failure paths.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: usize,
}

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        self.attempts += 1;
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}
