//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the composition engine needs from external
//! systems. The `mason-adapters` crate provides the production
//! implementations; tests use in-memory or scripted twins.
//!
//! ## Design Notes
//!
//! - The scheduling model is single-threaded cooperative, so every port
//!   is a blocking trait; metadata lookups gate a node's Writing phase
//!   by ordinary control flow. Async-ready (can be extended with
//!   async-trait later).
//! - No port mutates a PropertyBag. Callers merge results explicitly.

use std::path::Path;

use crate::domain::{
    ArtifactCoordinate, ModuleRecord, ModuleRecords, OptionKind, Platform, PropertyBag,
    TemplateId, VersionMetadata,
};
use crate::error::MasonResult;

/// Port for the persisted configuration store.
///
/// Implemented by:
/// - `mason_adapters::config_store::TomlConfigStore` (production, `.mason.toml`)
/// - `mason_adapters::config_store::MemoryConfigStore` (testing)
pub trait ConfigStore: Send + Sync {
    /// Project-wide persisted configuration (may be empty).
    fn project(&self) -> MasonResult<PropertyBag>;

    /// Persist the project-wide configuration.
    fn set_project(&self, bag: &PropertyBag) -> MasonResult<()>;

    /// All persisted module records, keyed by project-relative path.
    fn modules(&self) -> MasonResult<ModuleRecords>;

    /// Persist one module record under its path.
    fn set_module(&self, record: &ModuleRecord) -> MasonResult<()>;
}

/// Port for reading an existing build descriptor.
///
/// Returns a flat property bag — `groupId`, `artifactId`, `version`,
/// `aemVersion` when present — or an empty bag when no descriptor
/// exists. Consumed only during root Initializing.
pub trait DescriptorReader: Send + Sync {
    fn read(&self, project_root: &Path) -> MasonResult<PropertyBag>;
}

/// One question for the prompt collaborator.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub kind: OptionKind,
    /// Suggested answer, shown but not forced.
    pub default: Option<String>,
}

/// Port for interactive resolution.
///
/// The engine re-invokes `prompt` until the answer passes the property's
/// validator; a non-interactive implementation should return an error so
/// the invocation fails instead of hanging.
///
/// Implemented by:
/// - `mason_cli`'s dialoguer prompter (feature `interactive`)
/// - `mason_adapters::prompt::{ScriptedPrompter, UnattendedPrompter}` (testing / batch)
pub trait Prompter: Send + Sync {
    fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String>;
}

/// Port for the remote artifact-metadata service.
///
/// A pure function of (coordinate, platform) plus one external call.
/// Failures must propagate — the engine aborts the affected node's
/// write phase rather than emit a guessed version.
pub trait MetadataService: Send + Sync {
    fn latest(
        &self,
        coordinate: &ArtifactCoordinate,
        platform: Platform,
    ) -> MasonResult<VersionMetadata>;
}

/// Port for the templating/emission collaborator.
///
/// The engine supplies the ordered template list and the final merged
/// context; path mapping and content substitution are the adapter's
/// contract.
pub trait TemplateEmitter: Send + Sync {
    fn emit(&self, template: TemplateId, context: &PropertyBag) -> MasonResult<()>;
}
