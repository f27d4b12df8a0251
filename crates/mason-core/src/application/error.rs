//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports,
//! not business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during composition orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Artifact-metadata lookup failed. Never recovered by guessing a
    /// version; the affected node's write phase aborts instead.
    #[error("could not resolve latest version of {coordinate}: {reason}")]
    MetadataResolution { coordinate: String, reason: String },

    /// The emission collaborator failed to render or write a template.
    #[error("failed to emit template '{template}': {reason}")]
    EmissionFailed { template: String, reason: String },

    /// The persisted configuration store could not be read or written.
    #[error("configuration store error: {reason}")]
    StoreError { reason: String },

    /// The build descriptor could not be read.
    #[error("build descriptor error: {reason}")]
    DescriptorError { reason: String },

    /// The prompt collaborator failed to obtain an answer.
    #[error("could not obtain a value for '{name}': {reason}")]
    PromptFailed { name: String, reason: String },

    /// No generator factory registered for a module kind.
    #[error("no generator registered for module kind '{kind}'")]
    GeneratorNotRegistered { kind: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MetadataResolution { coordinate, .. } => vec![
                format!("Could not reach version metadata for {}", coordinate),
                "Check network access to the artifact repository".into(),
                "Already-written modules are intact; re-run to finish the rest".into(),
            ],
            Self::StoreError { .. } => vec![
                "Check that .mason.toml is readable and writable".into(),
                "Delete a corrupted .mason.toml to start fresh (loses module records)".into(),
            ],
            Self::DescriptorError { .. } => vec![
                "Check that pom.xml at the project root is readable".into(),
            ],
            Self::PromptFailed { name, .. } => vec![
                format!("Supply '{}' as a flag to avoid prompting", name),
                "Or run with --defaults to accept computed values".into(),
            ],
            Self::GeneratorNotRegistered { .. } => vec![
                "Try: mason list to see available module kinds".into(),
            ],
            Self::EmissionFailed { .. } => vec![
                "Check write permissions on the output directory".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MetadataResolution { .. } => ErrorCategory::Resolution,
            Self::EmissionFailed { .. } | Self::StoreError { .. } => ErrorCategory::Internal,
            Self::DescriptorError { .. } => ErrorCategory::Internal,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::GeneratorNotRegistered { .. } => ErrorCategory::NotFound,
        }
    }
}
