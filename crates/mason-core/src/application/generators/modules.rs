//! Child module generators.
//!
//! Each kind shares the same lifecycle and differs only in its schema,
//! defaults, artifact needs, and template table. All of them derive
//! their artifact id from the parent project's, suffixed with the
//! module path.

use super::{ModuleGenerator, common_options};
use crate::domain::{
    ArtifactRequest, ModuleKind, OptionSpec, Platform, PropertyBag, TemplateId, Value,
    coordinates, keys, module_templates,
};

fn artifact_id_default(
    bag: &PropertyBag,
    parent: Option<&PropertyBag>,
    path: &str,
) -> Option<(&'static str, Value)> {
    if bag.contains(keys::ARTIFACT_ID) {
        return None;
    }
    let parent_artifact = parent?.get_str(keys::ARTIFACT_ID)?;
    Some((
        keys::ARTIFACT_ID,
        format!("{parent_artifact}.{path}").into(),
    ))
}

// ── app ───────────────────────────────────────────────────────────────────────

/// Application code bundle.
pub struct AppGenerator;

static APP_SCHEMA: &[OptionSpec] = &[
    common_options::ARTIFACT_ID,
    common_options::PUBLISH,
    common_options::EXAMPLES,
];

impl ModuleGenerator for AppGenerator {
    fn module_kind(&self) -> Option<ModuleKind> {
        Some(ModuleKind::App)
    }

    fn option_schema(&self) -> &'static [OptionSpec] {
        APP_SCHEMA
    }

    fn required(&self) -> &'static [&'static str] {
        &[keys::ARTIFACT_ID]
    }

    fn defaults(
        &self,
        bag: &PropertyBag,
        parent: Option<&PropertyBag>,
        path: &str,
    ) -> Vec<(&'static str, Value)> {
        let mut defaults = vec![
            (keys::EXAMPLES, Value::Bool(true)),
            (keys::PUBLISH, Value::Bool(false)),
        ];
        defaults.extend(artifact_id_default(bag, parent, path));
        defaults
    }

    fn artifact_requests(&self, platform: Platform) -> Vec<ArtifactRequest> {
        // The bundle compiles against the platform API.
        vec![ArtifactRequest {
            key: keys::PLATFORM_API_VERSION,
            coordinate: coordinates::platform_api(platform),
        }]
    }

    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        module_templates(ModuleKind::App, flags)
    }

    fn default_path(&self) -> &'static str {
        ModuleKind::App.default_path()
    }
}

// ── tests-it ──────────────────────────────────────────────────────────────────

/// Integration-test module.
pub struct ItTestsGenerator;

static IT_SCHEMA: &[OptionSpec] = &[common_options::ARTIFACT_ID, common_options::PUBLISH];

impl ModuleGenerator for ItTestsGenerator {
    fn module_kind(&self) -> Option<ModuleKind> {
        Some(ModuleKind::ItTests)
    }

    fn option_schema(&self) -> &'static [OptionSpec] {
        IT_SCHEMA
    }

    fn required(&self) -> &'static [&'static str] {
        &[keys::ARTIFACT_ID]
    }

    fn defaults(
        &self,
        bag: &PropertyBag,
        parent: Option<&PropertyBag>,
        path: &str,
    ) -> Vec<(&'static str, Value)> {
        let mut defaults = vec![(keys::PUBLISH, Value::Bool(false))];
        defaults.extend(artifact_id_default(bag, parent, path));
        defaults
    }

    fn artifact_requests(&self, platform: Platform) -> Vec<ArtifactRequest> {
        // Two independent lookups; both must land before Writing.
        vec![
            ArtifactRequest {
                key: keys::TESTING_CLIENT_VERSION,
                coordinate: coordinates::testing_clients(platform),
            },
            ArtifactRequest {
                key: keys::PLATFORM_API_VERSION,
                coordinate: coordinates::platform_api(platform),
            },
        ]
    }

    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        module_templates(ModuleKind::ItTests, flags)
    }

    fn default_path(&self) -> &'static str {
        ModuleKind::ItTests.default_path()
    }
}

// ── ui-config ─────────────────────────────────────────────────────────────────

/// Runtime OSGi configuration package.
pub struct UiConfigGenerator;

static CONFIG_SCHEMA: &[OptionSpec] = &[common_options::ARTIFACT_ID, common_options::PUBLISH];

impl ModuleGenerator for UiConfigGenerator {
    fn module_kind(&self) -> Option<ModuleKind> {
        Some(ModuleKind::UiConfig)
    }

    fn option_schema(&self) -> &'static [OptionSpec] {
        CONFIG_SCHEMA
    }

    fn required(&self) -> &'static [&'static str] {
        &[keys::ARTIFACT_ID]
    }

    fn defaults(
        &self,
        bag: &PropertyBag,
        parent: Option<&PropertyBag>,
        path: &str,
    ) -> Vec<(&'static str, Value)> {
        let mut defaults = vec![(keys::PUBLISH, Value::Bool(false))];
        defaults.extend(artifact_id_default(bag, parent, path));
        defaults
    }

    fn artifact_requests(&self, _platform: Platform) -> Vec<ArtifactRequest> {
        Vec::new()
    }

    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        module_templates(ModuleKind::UiConfig, flags)
    }

    fn default_path(&self) -> &'static str {
        ModuleKind::UiConfig.default_path()
    }
}

// ── dispatcher ────────────────────────────────────────────────────────────────

/// Web-tier dispatcher configuration.
pub struct DispatcherGenerator;

static DISPATCHER_SCHEMA: &[OptionSpec] = &[common_options::ARTIFACT_ID, common_options::PUBLISH];

impl ModuleGenerator for DispatcherGenerator {
    fn module_kind(&self) -> Option<ModuleKind> {
        Some(ModuleKind::Dispatcher)
    }

    fn option_schema(&self) -> &'static [OptionSpec] {
        DISPATCHER_SCHEMA
    }

    fn required(&self) -> &'static [&'static str] {
        &[keys::ARTIFACT_ID]
    }

    fn defaults(
        &self,
        bag: &PropertyBag,
        parent: Option<&PropertyBag>,
        path: &str,
    ) -> Vec<(&'static str, Value)> {
        let mut defaults = vec![(keys::PUBLISH, Value::Bool(false))];
        defaults.extend(artifact_id_default(bag, parent, path));
        defaults
    }

    fn artifact_requests(&self, _platform: Platform) -> Vec<ArtifactRequest> {
        Vec::new()
    }

    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        module_templates(ModuleKind::Dispatcher, flags)
    }

    fn default_path(&self) -> &'static str {
        ModuleKind::Dispatcher.default_path()
    }
}
