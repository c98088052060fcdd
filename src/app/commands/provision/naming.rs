//! Prompt helpers and the name-creation retry loop shared by the stages.

use tracing::warn;

use super::ProvisioningWorkflow;
use crate::domain::{AppError, Creation};

/// How many remote entries matched a derived name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Matches {
    None,
    One,
    Many(usize),
}

impl Matches {
    pub(super) fn count(count: usize) -> Self {
        match count {
            0 => Matches::None,
            1 => Matches::One,
            n => Matches::Many(n),
        }
    }
}

/// Exactly one entry named `name`, or the diagnostic naming the list command.
pub(super) fn require_single<T: Clone>(
    kind: &str,
    name: &str,
    list_command: &str,
    candidates: &[T],
    name_of: impl Fn(&T) -> &str,
) -> Result<T, AppError> {
    let matching: Vec<&T> = candidates.iter().filter(|c| name_of(c) == name).collect();
    match matching.as_slice() {
        [single] => Ok((*single).clone()),
        other => Err(AppError::ResourceNotFound {
            kind: kind.to_string(),
            name: name.to_string(),
            matches: other.len(),
            list_command: list_command.to_string(),
        }),
    }
}

impl ProvisioningWorkflow<'_> {
    /// Sort `names`, let the operator pick one and return it.
    pub(super) fn choose_name(
        &self,
        prompt: &str,
        mut names: Vec<String>,
    ) -> Result<String, AppError> {
        names.sort();
        let index = self.prompt.choose(prompt, &names)?.ok_or(AppError::Aborted)?;
        names
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Prompt(format!("No entry at index {index}")))
    }

    pub(super) fn confirm(&self, prompt: &str) -> Result<bool, AppError> {
        self.prompt.confirm(prompt)?.ok_or(AppError::Aborted)
    }

    pub(super) fn ask(&self, prompt: &str) -> Result<String, AppError> {
        let answer = self.prompt.input(prompt)?.ok_or(AppError::Aborted)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() { Err(AppError::Aborted) } else { Ok(trimmed.to_string()) }
    }

    /// Submit candidate names until the service accepts one.
    ///
    /// `first` is tried without prompting. Rejections are reported and the
    /// operator is asked again, within the configured attempt limit.
    pub(super) fn create_named<T>(
        &self,
        what: &str,
        question: &str,
        first: Option<String>,
        mut submit: impl FnMut(&str) -> Result<Creation<T>, AppError>,
    ) -> Result<T, AppError> {
        let limit = self.settings.attempt_limit();
        let mut candidate = first;
        let mut attempts = 0;

        loop {
            if !limit.allows(attempts) {
                return Err(AppError::AttemptsExhausted { what: what.to_string(), attempts });
            }
            let name = match candidate.take() {
                Some(name) => name,
                None => self.ask(question)?,
            };
            attempts += 1;

            match submit(&name)? {
                Creation::Created(value) => return Ok(value),
                Creation::Invalid(message) => {
                    warn!("Cannot create {} '{}': {}", what, name, message);
                }
            }
        }
    }
}
