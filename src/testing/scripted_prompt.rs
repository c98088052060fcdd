use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::OperatorPrompt;

/// One scripted operator reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choose(usize),
    Confirm(bool),
    Input(String),
    Abort,
}

/// Replays answers in order and records every prompt shown.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Answer>>,
    pub asked: Mutex<Vec<String>>,
    pub choices_shown: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self { answers: Mutex::new(answers.into()), ..Self::default() }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Answer {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt}"))
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, AppError> {
        self.choices_shown.lock().unwrap().push(items.to_vec());
        match self.next(prompt) {
            Answer::Choose(index) => Ok(Some(index)),
            Answer::Abort => Ok(None),
            other => panic!("expected a choice for '{prompt}', script has {other:?}"),
        }
    }

    fn confirm(&self, prompt: &str) -> Result<Option<bool>, AppError> {
        match self.next(prompt) {
            Answer::Confirm(value) => Ok(Some(value)),
            Answer::Abort => Ok(None),
            other => panic!("expected a confirmation for '{prompt}', script has {other:?}"),
        }
    }

    fn input(&self, prompt: &str) -> Result<Option<String>, AppError> {
        match self.next(prompt) {
            Answer::Input(value) => Ok(Some(value)),
            Answer::Abort => Ok(None),
            other => panic!("expected text input for '{prompt}', script has {other:?}"),
        }
    }
}
