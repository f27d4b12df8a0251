//! Composition engine - main application orchestrator.
//!
//! Drives a root generator node and the child nodes it declares through
//! the lifecycle
//!
//! `Initializing -> Prompting -> Configuring -> ComposingChildren ->
//! Writing -> End`
//!
//! passing the root's sealed PropertyBag down to every child and
//! guaranteeing ordering and single-invocation-per-module semantics.
//! Scheduling is single-threaded and cooperative: siblings run
//! sequentially and share nothing but the read-only parent bag, so no
//! locking is needed around record persistence or the invariant check.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::generators::{GeneratorRegistry, ModuleGenerator};
use crate::application::ports::{
    ConfigStore, DescriptorReader, MetadataService, PromptRequest, Prompter, TemplateEmitter,
};
use crate::domain::{
    Discarded, DomainError, ModuleKind, ModuleRecord, ModuleRecords, OptionKind, Platform,
    PropertyBag, PropertySources, Value, check_singleton, keys, resolve, validation,
};
use crate::error::{MasonError, MasonResult};

// ── request / report types ────────────────────────────────────────────────────

/// One requested child module.
#[derive(Debug, Clone)]
pub struct ModuleRequest {
    pub kind: ModuleKind,
    /// Project-relative location; the kind's default when `None`.
    pub path: Option<String>,
    /// Module-local invocation options (flags, artifact id override).
    pub options: PropertyBag,
}

impl ModuleRequest {
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            path: None,
            options: PropertyBag::new(),
        }
    }

    pub fn with_options(mut self, options: PropertyBag) -> Self {
        self.options = options;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A full root-composition invocation.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub project_root: PathBuf,
    /// Project-wide invocation options.
    pub options: PropertyBag,
    pub modules: Vec<ModuleRequest>,
    pub use_defaults: bool,
}

/// One module that reached End.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOutcome {
    pub kind: ModuleKind,
    pub path: String,
    pub templates_emitted: usize,
}

/// One node whose Writing phase was aborted. Siblings already written
/// stay on disk; the invoker still sees an overall failure.
#[derive(Debug)]
pub struct ModuleFailure {
    /// `None` when the project root itself failed to write.
    pub kind: Option<ModuleKind>,
    pub path: String,
    pub error: MasonError,
}

/// What a composition run produced.
#[derive(Debug)]
pub struct ComposeReport {
    /// The root's sealed property bag, for display.
    pub project: PropertyBag,
    pub completed: Vec<ModuleOutcome>,
    pub failed: Vec<ModuleFailure>,
    pub root_templates: usize,
}

impl ComposeReport {
    /// True iff every requested node reached End.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

// ── lifecycle ─────────────────────────────────────────────────────────────────

/// Strictly ordered, non-skippable node states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Initializing,
    Prompting,
    Configuring,
    ComposingChildren,
    Writing,
    End,
}

/// The unit of composition: one generator plus its lifecycle state.
///
/// A node with a parent skips the invariant-check portion of Configuring
/// and has no children of its own — module generators are exactly one
/// level deep under the project root.
struct GeneratorNode {
    generator: Box<dyn ModuleGenerator>,
    path: String,
    parent: Option<Arc<PropertyBag>>,
    bag: PropertyBag,
    discarded: Vec<Discarded>,
    phase: Phase,
}

impl GeneratorNode {
    fn new(generator: Box<dyn ModuleGenerator>, path: String, parent: Option<Arc<PropertyBag>>) -> Self {
        Self {
            generator,
            path,
            parent,
            bag: PropertyBag::new(),
            discarded: Vec::new(),
            phase: Phase::Initializing,
        }
    }

    fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Resolve this node's PropertyBag from its sources.
    fn initialize(
        &mut self,
        options: &PropertyBag,
        persisted: &PropertyBag,
        descriptor: &PropertyBag,
        use_defaults: bool,
    ) {
        debug_assert_eq!(self.phase, Phase::Initializing);

        let sources = PropertySources {
            options,
            persisted,
            descriptor,
            use_defaults,
        };
        let generator = self.generator.as_ref();
        let parent = self.parent.as_deref();
        let resolution = resolve(&sources, generator.option_schema(), |bag| {
            generator.defaults(bag, parent, &self.path)
        });

        debug!(
            path = %self.path,
            resolved = resolution.bag.len(),
            discarded = resolution.discarded.len(),
            "node initialized"
        );
        self.bag = resolution.bag;
        self.discarded = resolution.discarded;
        self.phase = Phase::Prompting;
    }

    /// Obtain every schema property not already resolved, re-invoking the
    /// prompt collaborator until its validator accepts. In defaults mode
    /// nothing is asked: a discarded or missing required value fails the
    /// invocation instead of being silently coerced.
    fn prompt(&mut self, prompter: &dyn Prompter, use_defaults: bool) -> MasonResult<()> {
        debug_assert_eq!(self.phase, Phase::Prompting);

        let defaults =
            self.generator
                .defaults(&self.bag, self.parent.as_deref(), &self.path);

        for spec in self.generator.option_schema() {
            if self.bag.contains(spec.name) {
                continue;
            }

            if use_defaults {
                if let Some(d) = self.discarded.iter().find(|d| d.name == spec.name) {
                    return Err(DomainError::InvalidProperty {
                        name: d.name.clone(),
                        value: d.value.clone(),
                        reason: d.reason.clone(),
                    }
                    .into());
                }
                if self.generator.required().contains(&spec.name) {
                    return Err(DomainError::MissingProperty {
                        name: spec.name.to_string(),
                    }
                    .into());
                }
                continue;
            }

            let default = defaults
                .iter()
                .find(|(name, _)| *name == spec.name)
                .map(|(_, value)| display_value(value));

            loop {
                let request = PromptRequest {
                    name: spec.name,
                    message: spec.description,
                    kind: spec.kind,
                    default: default.clone(),
                };
                let answer = prompter.prompt(&request)?;

                match spec.kind {
                    OptionKind::Flag => match parse_flag(&answer) {
                        Some(flag) => {
                            self.bag.set(spec.name, flag);
                            break;
                        }
                        None => {
                            warn!(name = spec.name, %answer, "expected yes/no, re-prompting");
                        }
                    },
                    OptionKind::Text => match spec.validate.map_or(Ok(()), |v| v(&answer)) {
                        Ok(()) => {
                            self.bag.set(spec.name, answer);
                            break;
                        }
                        Err(reason) => {
                            warn!(name = spec.name, %reason, "invalid answer, re-prompting");
                        }
                    },
                }
            }
        }

        for name in self.generator.required() {
            if !self.bag.contains(name) {
                return Err(DomainError::MissingProperty {
                    name: (*name).to_string(),
                }
                .into());
            }
        }

        self.phase = Phase::Configuring;
        Ok(())
    }

    /// Persist this node's resolved properties; the root additionally
    /// runs the singleton check across all existing records plus the
    /// requested candidates, before any child is composed.
    fn configure(
        &mut self,
        store: &dyn ConfigStore,
        candidates: &[(ModuleKind, String)],
    ) -> MasonResult<()> {
        debug_assert_eq!(self.phase, Phase::Configuring);

        if self.is_root() {
            let existing = store.modules()?;
            let mut accepted: Vec<&(ModuleKind, String)> = Vec::new();
            for candidate in candidates {
                let (kind, path) = candidate;
                check_singleton(&existing, *kind, path)?;
                if kind.is_singleton() {
                    if let Some((_, earlier)) =
                        accepted.iter().find(|(k, p)| k == kind && p != path)
                    {
                        return Err(DomainError::DuplicateModule {
                            kind: kind.to_string(),
                            existing: earlier.clone(),
                            candidate: path.clone(),
                        }
                        .into());
                    }
                }
                accepted.push(candidate);
            }
            store.set_project(&self.bag)?;
        } else if let Some(kind) = self.generator.module_kind() {
            store.set_module(&ModuleRecord::new(self.path.clone(), kind, self.bag.clone()))?;
        }

        self.phase = Phase::ComposingChildren;
        Ok(())
    }

    /// Resolve required artifact metadata, select templates, and request
    /// emission with the final merged bag as context. Both lookups (when
    /// a kind needs two) must land before the first emit.
    fn write(
        &mut self,
        metadata: &dyn MetadataService,
        emitter: &dyn TemplateEmitter,
        platform: Platform,
        extra: &PropertyBag,
    ) -> MasonResult<usize> {
        debug_assert_eq!(self.phase, Phase::ComposingChildren);
        self.phase = Phase::Writing;

        let mut context = match self.parent.as_deref() {
            Some(parent) => self.bag.merged_with(parent),
            None => self.bag.clone(),
        };
        context.set(keys::MODULE_PATH, self.path.clone());
        if let Some(package) = context.get_str(keys::PACKAGE).map(str::to_string) {
            context.set(keys::PACKAGE_PATH, package.replace('.', "/"));
        }
        // The merge shadows the parent's artifact id with the module's
        // own; templates still need it for their <parent> block.
        if let Some(parent) = self.parent.as_deref() {
            if let Some(artifact_id) = parent.get_str(keys::ARTIFACT_ID) {
                context.set(keys::PARENT_ARTIFACT_ID, artifact_id);
            }
        }
        context.merge_absent(extra);

        for request in self.generator.artifact_requests(platform) {
            let meta = metadata.latest(&request.coordinate, platform)?;
            debug!(coordinate = %request.coordinate, version = %meta.version, "resolved");
            // "platformApiVersion" also yields "platformApiGroupId" and
            // "platformApiArtifactId" so templates can spell the full
            // dependency without a second table.
            let base = request.key.strip_suffix("Version").unwrap_or(request.key);
            context.set(format!("{base}GroupId"), meta.group_id);
            context.set(format!("{base}ArtifactId"), meta.artifact_id);
            context.set(request.key, meta.version);
        }

        let templates = self.generator.templates(&self.bag);
        for id in &templates {
            emitter.emit(*id, &context)?;
        }

        self.phase = Phase::End;
        info!(path = %self.path, templates = templates.len(), "module complete");
        Ok(templates.len())
    }
}

// ── the engine ────────────────────────────────────────────────────────────────

/// Orchestrates one root node and its children over the injected ports.
pub struct ComposeService {
    store: Box<dyn ConfigStore>,
    descriptor: Box<dyn DescriptorReader>,
    prompter: Box<dyn Prompter>,
    metadata: Box<dyn MetadataService>,
    emitter: Box<dyn TemplateEmitter>,
    registry: GeneratorRegistry,
}

impl ComposeService {
    /// Create a new engine with the given adapters.
    pub fn new(
        store: Box<dyn ConfigStore>,
        descriptor: Box<dyn DescriptorReader>,
        prompter: Box<dyn Prompter>,
        metadata: Box<dyn MetadataService>,
        emitter: Box<dyn TemplateEmitter>,
    ) -> Self {
        Self {
            store,
            descriptor,
            prompter,
            metadata,
            emitter,
            registry: GeneratorRegistry::builtin(),
        }
    }

    /// Swap the generator registry (tests, future plug-in kinds).
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run one root composition to completion.
    ///
    /// Validation and invariant failures abort the whole run before any
    /// child writes; a metadata failure aborts only the affected node's
    /// write phase and is reported through [`ComposeReport::failed`].
    #[instrument(skip_all, fields(root = %request.project_root.display()))]
    pub fn compose(&self, request: ComposeRequest) -> MasonResult<ComposeReport> {
        info!(modules = request.modules.len(), "composition started");

        // ── root: Initializing / Prompting ────────────────────────────
        let mut root = GeneratorNode::new(self.registry.project_root(), ".".into(), None);
        let persisted = self.store.project()?;
        let descriptor = self.descriptor.read(&request.project_root)?;
        root.initialize(&request.options, &persisted, &descriptor, request.use_defaults);
        root.prompt(self.prompter.as_ref(), request.use_defaults)?;

        // Candidate paths are fixed here so the invariant check sees the
        // exact set of modules about to be composed.
        let mut candidates: Vec<(ModuleKind, String)> = Vec::new();
        for module in &request.modules {
            let path = module
                .path
                .clone()
                .unwrap_or_else(|| module.kind.default_path().to_string());
            validation::module_path(&path)?;
            candidates.push((module.kind, path));
        }

        // ── root: Configuring (invariant check + persist) ─────────────
        root.configure(self.store.as_ref(), &candidates)?;

        let platform = platform_of(&root.bag)?;
        let parent = Arc::new(root.bag.clone());

        // ── root: ComposingChildren ───────────────────────────────────
        let mut completed = Vec::new();
        let mut failed = Vec::new();
        let empty = PropertyBag::new();

        for (module, (kind, path)) in request.modules.iter().zip(&candidates) {
            let generator = self.registry.create(*kind)?;
            let mut child =
                GeneratorNode::new(generator, path.clone(), Some(Arc::clone(&parent)));

            let persisted = self
                .store
                .modules()?
                .get(path)
                .map(|record| record.properties.clone())
                .unwrap_or_default();
            child.initialize(&module.options, &persisted, &empty, request.use_defaults);
            child.prompt(self.prompter.as_ref(), request.use_defaults)?;
            child.configure(self.store.as_ref(), &[])?;

            match child.write(
                self.metadata.as_ref(),
                self.emitter.as_ref(),
                platform,
                &empty,
            ) {
                Ok(count) => completed.push(ModuleOutcome {
                    kind: *kind,
                    path: path.clone(),
                    templates_emitted: count,
                }),
                Err(error) => {
                    warn!(path = %path, %error, "module write aborted");
                    failed.push(ModuleFailure {
                        kind: Some(*kind),
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        // ── root: Writing (after children, so the module list is full) ─
        let extra = PropertyBag::new().with(
            keys::MODULE_LIST,
            module_list(&self.store.modules()?, &candidates),
        );
        let root_templates = match root.write(
            self.metadata.as_ref(),
            self.emitter.as_ref(),
            platform,
            &extra,
        ) {
            Ok(count) => count,
            Err(error) => {
                warn!(%error, "project write aborted");
                failed.push(ModuleFailure {
                    kind: None,
                    path: ".".into(),
                    error,
                });
                0
            }
        };

        info!(
            completed = completed.len(),
            failed = failed.len(),
            "composition finished"
        );
        Ok(ComposeReport {
            project: root.bag.clone(),
            completed,
            failed,
            root_templates,
        })
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn platform_of(bag: &PropertyBag) -> MasonResult<Platform> {
    let raw = bag
        .get_str(keys::AEM_VERSION)
        .ok_or_else(|| DomainError::MissingProperty {
            name: keys::AEM_VERSION.to_string(),
        })?;
    Platform::from_str(raw).map_err(MasonError::from)
}

fn parse_flag(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Bag(_) => String::new(),
    }
}

/// `<module>` entries for the reactor pom: every persisted module plus
/// the candidates of this run, deduplicated and sorted.
fn module_list(records: &ModuleRecords, candidates: &[(ModuleKind, String)]) -> String {
    let mut paths: Vec<&str> = records.keys().map(String::as_str).collect();
    for (_, path) in candidates {
        if !paths.contains(&path.as_str()) {
            paths.push(path.as_str());
        }
    }
    paths.sort_unstable();
    paths
        .iter()
        .map(|p| format!("        <module>{p}</module>"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_of_reads_the_bag() {
        let bag = PropertyBag::new().with(keys::AEM_VERSION, "cloud");
        assert_eq!(platform_of(&bag).unwrap(), Platform::Cloud);

        let bag = PropertyBag::new().with(keys::AEM_VERSION, "6.5");
        assert_eq!(platform_of(&bag).unwrap(), Platform::V65);
    }

    #[test]
    fn platform_of_missing_is_an_error() {
        assert!(platform_of(&PropertyBag::new()).is_err());
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("N"), Some(false));
        assert_eq!(parse_flag(" true "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn module_list_merges_records_and_candidates() {
        let mut records = ModuleRecords::new();
        records.insert(
            "core".into(),
            ModuleRecord::new("core", ModuleKind::App, PropertyBag::new()),
        );
        let candidates = vec![
            (ModuleKind::ItTests, "it.tests".to_string()),
            (ModuleKind::App, "core".to_string()),
        ];

        let list = module_list(&records, &candidates);
        assert_eq!(
            list,
            "        <module>core</module>\n        <module>it.tests</module>"
        );
    }
}
