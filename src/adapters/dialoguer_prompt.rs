//! Terminal prompts backed by dialoguer.

use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, Select};

use crate::domain::AppError;
use crate::ports::OperatorPrompt;

/// Esc on a menu or confirmation, an empty answer, or Ctrl-C while typing
/// all come back as `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl DialoguerPrompt {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(prompt: &str, err: DialoguerError) -> AppError {
    AppError::Prompt(format!("{}: {}", prompt, err))
}

impl OperatorPrompt for DialoguerPrompt {
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, AppError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|err| prompt_error(prompt, err))
    }

    fn confirm(&self, prompt: &str) -> Result<Option<bool>, AppError> {
        Confirm::new().with_prompt(prompt).interact_opt().map_err(|err| prompt_error(prompt, err))
    }

    fn input(&self, prompt: &str) -> Result<Option<String>, AppError> {
        match Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text() {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(prompt_error(prompt, err)),
        }
    }
}
