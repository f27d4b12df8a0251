//! The interactive prompt collaborator.
//!
//! Terminal prompting is feature-gated (`interactive`, on by default);
//! without it — or without a TTY — composition falls back to the
//! unattended prompter, which turns unresolved properties into hard
//! errors instead of hanging on stdin.

use std::io::IsTerminal as _;

use mason_adapters::UnattendedPrompter;
use mason_core::application::ports::Prompter;

/// Pick the prompt collaborator for this invocation.
pub fn make_prompter(use_defaults: bool, quiet: bool) -> Box<dyn Prompter> {
    if use_defaults || quiet || !std::io::stdin().is_terminal() {
        return Box::new(UnattendedPrompter);
    }
    terminal_prompter()
}

#[cfg(feature = "interactive")]
fn terminal_prompter() -> Box<dyn Prompter> {
    Box::new(DialoguerPrompter)
}

#[cfg(not(feature = "interactive"))]
fn terminal_prompter() -> Box<dyn Prompter> {
    Box::new(UnattendedPrompter)
}

#[cfg(feature = "interactive")]
pub use dialoguer_impl::DialoguerPrompter;

#[cfg(feature = "interactive")]
mod dialoguer_impl {
    use dialoguer::{Confirm, Input};

    use mason_core::application::ApplicationError;
    use mason_core::application::ports::{PromptRequest, Prompter};
    use mason_core::domain::OptionKind;
    use mason_core::error::MasonResult;

    /// Terminal prompter backed by dialoguer.
    pub struct DialoguerPrompter;

    impl Prompter for DialoguerPrompter {
        fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String> {
            let prompt_failed = |reason: String| ApplicationError::PromptFailed {
                name: request.name.to_string(),
                reason,
            };

            match request.kind {
                OptionKind::Flag => {
                    let mut confirm = Confirm::new().with_prompt(request.message);
                    if let Some(default) = &request.default {
                        confirm = confirm.default(default == "true");
                    }
                    confirm
                        .interact()
                        .map(|answer| answer.to_string())
                        .map_err(|e| prompt_failed(e.to_string()).into())
                }
                OptionKind::Text => {
                    let mut input = Input::<String>::new()
                        .with_prompt(format!("{} — {}", request.name, request.message));
                    if let Some(default) = &request.default {
                        input = input.default(default.clone());
                    }
                    input
                        .interact_text()
                        .map_err(|e| prompt_failed(e.to_string()).into())
                }
            }
        }
    }
}
