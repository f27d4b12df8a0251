// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("invalid value for '{name}': '{value}' ({reason})")]
    InvalidProperty {
        name: String,
        value: String,
        reason: String, // populated from validation::* checkers
    },

    #[error("required property missing: {name}")]
    MissingProperty { name: String },

    #[error("invalid module path '{path}': {reason}")]
    InvalidModulePath { path: String, reason: String },

    // ========================================================================
    // Invariant Violations (409-level equivalent)
    // ========================================================================
    #[error("module kind '{kind}' already exists at '{existing}', cannot add it at '{candidate}'")]
    DuplicateModule {
        kind: String,
        existing: String,
        candidate: String,
    },

    // ========================================================================
    // Not Found / Parse Errors
    // ========================================================================
    #[error("unknown module kind: {0}")]
    UnknownModuleKind(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProperty { name, reason, .. } => vec![
                format!("Property '{}' was rejected: {}", name, reason),
                match name.as_str() {
                    "package" => "Use only letters and periods, e.g. com.mysite".into(),
                    "groupId" => "Use reverse-domain notation, e.g. com.mysite".into(),
                    "version" => "Use a Maven version, e.g. 1.0.0-SNAPSHOT".into(),
                    _ => "Pass a corrected value or re-run interactively".into(),
                },
            ],
            Self::MissingProperty { name } => vec![
                format!("'{}' was not supplied by any source", name),
                "Pass it as a flag, or run without --defaults to be prompted".into(),
            ],
            Self::DuplicateModule { kind, existing, .. } => vec![
                format!("A '{}' module is already configured at '{}'", kind, existing),
                "Re-run with the same --path to reconfigure it in place".into(),
                "Only one module of this kind may exist per project".into(),
            ],
            Self::UnknownModuleKind(_) => vec![
                "Known kinds: app, tests-it, ui-config, dispatcher".into(),
                "Try: mason list".into(),
            ],
            Self::UnknownPlatform(_) => vec!["Known platforms: cloud, 6.5".into()],
            Self::InvalidModulePath { .. } => vec![
                "Module paths are project-relative, e.g. core or it.tests".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProperty { .. }
            | Self::MissingProperty { .. }
            | Self::InvalidModulePath { .. } => ErrorCategory::Validation,
            Self::DuplicateModule { .. } => ErrorCategory::Invariant,
            Self::UnknownModuleKind(_) | Self::UnknownPlatform(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Invariant,
    NotFound,
    Internal,
}
