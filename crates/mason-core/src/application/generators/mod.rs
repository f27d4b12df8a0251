//! Module generators: the per-kind specialization behind a shared trait.
//!
//! A [`ModuleGenerator`] supplies the pieces that vary between module
//! kinds — option schema, defaults, artifact needs, template selection —
//! while the lifecycle itself lives in one place
//! (`services::compose`). Composition over inheritance: there is no
//! base-generator struct to subclass, just this trait plus small value
//! types.
//!
//! Child generator resolution goes through [`GeneratorRegistry`], an
//! explicit kind → factory mapping built once per engine. Nothing is
//! ever loaded by string path.

use std::collections::BTreeMap;

use crate::application::ApplicationError;
use crate::domain::{
    ArtifactRequest, ModuleKind, OptionSpec, Platform, PropertyBag, TemplateId, Value,
    validation,
};
use crate::error::MasonResult;

mod modules;
mod project;

pub use modules::{AppGenerator, DispatcherGenerator, ItTestsGenerator, UiConfigGenerator};
pub use project::ProjectGenerator;

// ── shared option specs ───────────────────────────────────────────────────────

/// Options every generator understands; kind-specific schemas are the
/// static concatenation of (a subset of) these plus their own entries.
pub mod common_options {
    use super::*;
    use crate::domain::keys;

    pub const GROUP_ID: OptionSpec = OptionSpec::text(
        keys::GROUP_ID,
        "Maven group id for all modules",
        validation::group_id,
    );

    pub const ARTIFACT_ID: OptionSpec = OptionSpec::text(
        keys::ARTIFACT_ID,
        "Maven artifact id",
        validation::artifact_id,
    );

    pub const VERSION: OptionSpec =
        OptionSpec::text(keys::VERSION, "Project version", validation::version);

    pub const AEM_VERSION: OptionSpec = OptionSpec::text(
        keys::AEM_VERSION,
        "Target platform (cloud or 6.5)",
        validation::aem_version,
    );

    pub const APP_TITLE: OptionSpec =
        OptionSpec::text(keys::APP_TITLE, "Human-readable project title", validation::app_title);

    pub const PACKAGE: OptionSpec =
        OptionSpec::text(keys::PACKAGE, "Java source package", validation::package);

    pub const PUBLISH: OptionSpec =
        OptionSpec::flag(keys::PUBLISH, "Include publish-tier content");

    pub const EXAMPLES: OptionSpec =
        OptionSpec::flag(keys::EXAMPLES, "Include sample code");
}

// ── the generator trait ───────────────────────────────────────────────────────

/// One module kind's contribution to the composition.
///
/// Implementations are stateless; everything they decide is a function
/// of the resolved PropertyBag (and, for children, the parent bag).
pub trait ModuleGenerator: Send + Sync {
    /// `None` for the project root, which is not itself a module.
    fn module_kind(&self) -> Option<ModuleKind>;

    /// The explicit option schema, statically composed.
    fn option_schema(&self) -> &'static [OptionSpec];

    /// Properties that must be present once Prompting completes.
    fn required(&self) -> &'static [&'static str];

    /// Hard-coded/computed fallbacks, consulted only under the
    /// use-defaults flag. `bag` is the partially-resolved bag; `parent`
    /// the root's sealed bag for child nodes; `path` the node's
    /// project-relative location.
    fn defaults(
        &self,
        bag: &PropertyBag,
        parent: Option<&PropertyBag>,
        path: &str,
    ) -> Vec<(&'static str, Value)>;

    /// Metadata lookups that must complete before Writing.
    fn artifact_requests(&self, platform: Platform) -> Vec<ArtifactRequest>;

    /// Ordered template identifiers for the resolved flags.
    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId>;

    /// Module path used when the invocation does not choose one.
    fn default_path(&self) -> &'static str;
}

// ── registry ──────────────────────────────────────────────────────────────────

type Factory = fn() -> Box<dyn ModuleGenerator>;

/// Explicit mapping from module-kind tag to generator factory.
pub struct GeneratorRegistry {
    factories: BTreeMap<ModuleKind, Factory>,
}

impl GeneratorRegistry {
    /// Registry with every built-in module kind.
    pub fn builtin() -> Self {
        let mut factories: BTreeMap<ModuleKind, Factory> = BTreeMap::new();
        factories.insert(ModuleKind::App, || Box::new(AppGenerator));
        factories.insert(ModuleKind::ItTests, || Box::new(ItTestsGenerator));
        factories.insert(ModuleKind::UiConfig, || Box::new(UiConfigGenerator));
        factories.insert(ModuleKind::Dispatcher, || Box::new(DispatcherGenerator));
        Self { factories }
    }

    /// The root generator is fixed; it is not reachable by kind.
    pub fn project_root(&self) -> Box<dyn ModuleGenerator> {
        Box::new(ProjectGenerator)
    }

    /// Instantiate the generator for a module kind.
    pub fn create(&self, kind: ModuleKind) -> MasonResult<Box<dyn ModuleGenerator>> {
        self.factories
            .get(&kind)
            .map(|factory| factory())
            .ok_or_else(|| {
                ApplicationError::GeneratorNotRegistered {
                    kind: kind.to_string(),
                }
                .into()
            })
    }

    pub fn kinds(&self) -> impl Iterator<Item = ModuleKind> + '_ {
        self.factories.keys().copied()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_covers_every_kind() {
        let registry = GeneratorRegistry::builtin();
        for kind in ModuleKind::ALL {
            let generator = registry.create(kind).unwrap();
            assert_eq!(generator.module_kind(), Some(kind));
        }
    }

    #[test]
    fn project_root_generator_has_no_kind() {
        let registry = GeneratorRegistry::builtin();
        assert_eq!(registry.project_root().module_kind(), None);
    }

    #[test]
    fn kinds_iterate_deterministically() {
        let registry = GeneratorRegistry::builtin();
        let kinds: Vec<_> = registry.kinds().collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
    }
}
