use crate::domain::AppError;

/// Blocking operator-facing prompts.
///
/// `Ok(None)` is the abort sentinel: the operator cancelled instead of answering.
pub trait OperatorPrompt {
    /// Choose one of `items`; returns its index.
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, AppError>;

    fn confirm(&self, prompt: &str) -> Result<Option<bool>, AppError>;

    /// Free text; an empty answer aborts.
    fn input(&self, prompt: &str) -> Result<Option<String>, AppError>;
}
