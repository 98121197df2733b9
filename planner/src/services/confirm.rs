//! Confirmation prompt
//!
//! Destructive actions ask a blocking yes/no question first.

use crate::error::{AppError, Result};
use dialoguer::Confirm;

/// Blocking yes/no question
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Asks on the terminal; defaults to "no"
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| AppError::Generic(format!("Confirmation prompt failed: {}", e)))
    }
}

/// Answers every question the same way (`--yes`, scripts, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&self, message: &str) -> Result<bool> {
        tracing::debug!("Auto-answering '{}' with {}", message, self.0);
        Ok(self.0)
    }
}
