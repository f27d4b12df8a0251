//! Non-terminal prompt collaborators.
//!
//! The interactive dialoguer implementation lives in the CLI crate
//! behind its `interactive` feature; these two cover batch runs and
//! tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use mason_core::application::ApplicationError;
use mason_core::application::ports::{PromptRequest, Prompter};
use mason_core::error::MasonResult;

/// Refuses every prompt.
///
/// Used when no terminal is available: any property the sources and
/// defaults did not cover becomes a hard failure instead of a hang.
pub struct UnattendedPrompter;

impl Prompter for UnattendedPrompter {
    fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String> {
        Err(ApplicationError::PromptFailed {
            name: request.name.to_string(),
            reason: "running unattended; pass the value as an option or use --defaults".into(),
        }
        .into())
    }
}

/// Answers from a fixed script, in order; errors when it runs dry.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String> {
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                name: request.name.to_string(),
                reason: "answer script exhausted".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::OptionKind;

    fn request<'a>(name: &'a str) -> PromptRequest<'a> {
        PromptRequest {
            name,
            message: "test",
            kind: OptionKind::Text,
            default: None,
        }
    }

    #[test]
    fn unattended_always_fails() {
        assert!(UnattendedPrompter.prompt(&request("groupId")).is_err());
    }

    #[test]
    fn scripted_answers_in_order_then_fails() {
        let prompter = ScriptedPrompter::new(["a", "b"]);
        assert_eq!(prompter.prompt(&request("x")).unwrap(), "a");
        assert_eq!(prompter.prompt(&request("y")).unwrap(), "b");
        assert_eq!(prompter.remaining(), 0);
        assert!(prompter.prompt(&request("z")).is_err());
    }
}
