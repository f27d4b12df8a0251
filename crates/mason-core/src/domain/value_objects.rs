//! Domain value objects: ModuleKind and Platform.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! They hold NO composition logic. Which templates a kind emits lives in
//! `templates.rs`; which artifacts it pulls lives in `coordinates.rs`.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Module Kinds
//!
//! 1. Add the enum variant here (plus `as_str` / `FromStr` arms)
//! 2. Register a generator factory in `application::generators`
//! 3. Add a template table entry in `templates.rs`
//! 4. Done — nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModuleKind ────────────────────────────────────────────────────────────────

/// One independently-configurable unit of the generated project.
///
/// Kinds tagged singleton may appear at most once per project; the
/// registry invariant in `registry.rs` enforces this at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleKind {
    /// Application code bundle (OSGi jar). Not a singleton — a project may
    /// carry several, e.g. `core` plus a feature bundle.
    #[serde(rename = "app")]
    App,
    /// Integration-test module driving a running instance.
    #[serde(rename = "tests-it")]
    ItTests,
    /// Runtime OSGi configuration content package.
    #[serde(rename = "ui-config")]
    UiConfig,
    /// Web-tier dispatcher configuration.
    #[serde(rename = "dispatcher")]
    Dispatcher,
}

impl ModuleKind {
    /// Every kind, in the deterministic order used by listings.
    pub const ALL: [ModuleKind; 4] = [
        Self::App,
        Self::ItTests,
        Self::UiConfig,
        Self::Dispatcher,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::ItTests => "tests-it",
            Self::UiConfig => "ui-config",
            Self::Dispatcher => "dispatcher",
        }
    }

    /// Whether at most one module of this kind may exist per project.
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::ItTests | Self::UiConfig | Self::Dispatcher)
    }

    /// Project-relative path used when the caller does not choose one.
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::App => "core",
            Self::ItTests => "it.tests",
            Self::UiConfig => "ui.config",
            Self::Dispatcher => "dispatcher",
        }
    }

    /// Short human description for `mason list`.
    pub const fn description(self) -> &'static str {
        match self {
            Self::App => "application code bundle (OSGi jar)",
            Self::ItTests => "integration tests run against a live instance",
            Self::UiConfig => "runtime OSGi configuration package",
            Self::Dispatcher => "web-tier dispatcher configuration",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "app" | "bundle" | "core" => Ok(Self::App),
            "tests-it" | "it-tests" | "it" => Ok(Self::ItTests),
            "ui-config" | "config" => Ok(Self::UiConfig),
            "dispatcher" => Ok(Self::Dispatcher),
            other => Err(DomainError::UnknownModuleKind(other.to_string())),
        }
    }
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// The deployment target variant.
///
/// Affects which artifact coordinates and versions apply — see
/// `coordinates.rs`. `V65` is the fixed legacy tag; there is deliberately
/// no open-ended version field here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "cloud")]
    Cloud,
    #[serde(rename = "6.5")]
    V65,
}

impl Platform {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::V65 => "6.5",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cloud" | "cloudservice" | "aemaacs" => Ok(Self::Cloud),
            "6.5" | "65" | "quickstart" => Ok(Self::V65),
            other => Err(DomainError::UnknownPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_kind_display_matches_tag() {
        assert_eq!(ModuleKind::App.to_string(), "app");
        assert_eq!(ModuleKind::ItTests.to_string(), "tests-it");
        assert_eq!(ModuleKind::UiConfig.to_string(), "ui-config");
    }

    #[test]
    fn module_kind_from_str_accepts_aliases() {
        assert_eq!("bundle".parse::<ModuleKind>().unwrap(), ModuleKind::App);
        assert_eq!("it".parse::<ModuleKind>().unwrap(), ModuleKind::ItTests);
        assert_eq!(
            "config".parse::<ModuleKind>().unwrap(),
            ModuleKind::UiConfig
        );
    }

    #[test]
    fn module_kind_from_str_unknown_errors() {
        assert!("frontend".parse::<ModuleKind>().is_err());
        assert!("".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn singleton_flags() {
        assert!(!ModuleKind::App.is_singleton());
        assert!(ModuleKind::ItTests.is_singleton());
        assert!(ModuleKind::UiConfig.is_singleton());
        assert!(ModuleKind::Dispatcher.is_singleton());
    }

    #[test]
    fn platform_from_str_accepts_aliases() {
        assert_eq!("cloud".parse::<Platform>().unwrap(), Platform::Cloud);
        assert_eq!("65".parse::<Platform>().unwrap(), Platform::V65);
        assert_eq!("quickstart".parse::<Platform>().unwrap(), Platform::V65);
    }

    #[test]
    fn platform_from_str_unknown_errors() {
        assert!("6.4".parse::<Platform>().is_err());
    }
}
