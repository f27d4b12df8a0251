//! The project-root generator.
//!
//! Resolves the project-wide property set every child inherits, and
//! emits the reactor pom plus repository boilerplate. Its write phase
//! runs after the children so the module list it renders is complete.

use super::{ModuleGenerator, common_options};
use crate::domain::{
    ArtifactRequest, ModuleKind, OptionSpec, Platform, PropertyBag, TemplateId, Value,
    coordinates, keys, project_templates, validation,
};

pub struct ProjectGenerator;

static SCHEMA: &[OptionSpec] = &[
    common_options::GROUP_ID,
    common_options::ARTIFACT_ID,
    common_options::VERSION,
    common_options::AEM_VERSION,
    common_options::APP_TITLE,
    common_options::PACKAGE,
];

static REQUIRED: &[&str] = &[
    keys::GROUP_ID,
    keys::ARTIFACT_ID,
    keys::VERSION,
    keys::AEM_VERSION,
    keys::APP_TITLE,
    keys::PACKAGE,
];

impl ModuleGenerator for ProjectGenerator {
    fn module_kind(&self) -> Option<ModuleKind> {
        None
    }

    fn option_schema(&self) -> &'static [OptionSpec] {
        SCHEMA
    }

    fn required(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn defaults(
        &self,
        bag: &PropertyBag,
        _parent: Option<&PropertyBag>,
        _path: &str,
    ) -> Vec<(&'static str, Value)> {
        let mut defaults: Vec<(&'static str, Value)> = vec![
            (keys::VERSION, "1.0.0-SNAPSHOT".into()),
            (keys::AEM_VERSION, "cloud".into()),
        ];

        if let Some(artifact_id) = bag.get_str(keys::ARTIFACT_ID) {
            defaults.push((keys::APP_TITLE, artifact_id.into()));
        }

        // The group id doubles as the Java package only when it passes
        // the stricter package rule; otherwise the slot stays empty and
        // the prompting phase takes over.
        if let Some(group_id) = bag.get_str(keys::GROUP_ID) {
            if validation::package(group_id).is_ok() {
                defaults.push((keys::PACKAGE, group_id.into()));
            }
        }

        defaults
    }

    fn artifact_requests(&self, platform: Platform) -> Vec<ArtifactRequest> {
        // The reactor pom pins the platform API in dependencyManagement.
        vec![ArtifactRequest {
            key: keys::PLATFORM_API_VERSION,
            coordinate: coordinates::platform_api(platform),
        }]
    }

    fn templates(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        project_templates(flags)
    }

    fn default_path(&self) -> &'static str {
        "."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_version_and_platform() {
        let bag = PropertyBag::new();
        let defaults = ProjectGenerator.defaults(&bag, None, ".");

        assert!(defaults.contains(&(keys::VERSION, "1.0.0-SNAPSHOT".into())));
        assert!(defaults.contains(&(keys::AEM_VERSION, "cloud".into())));
    }

    #[test]
    fn package_defaults_from_clean_group_id() {
        let bag = PropertyBag::new().with(keys::GROUP_ID, "com.mysite");
        let defaults = ProjectGenerator.defaults(&bag, None, ".");
        assert!(defaults.contains(&(keys::PACKAGE, "com.mysite".into())));
    }

    #[test]
    fn package_not_defaulted_from_digit_group_id() {
        // "com.mysite123" is a valid group id but not a valid package, so
        // no fallback is offered: the user must be asked.
        let bag = PropertyBag::new().with(keys::GROUP_ID, "com.mysite123");
        let defaults = ProjectGenerator.defaults(&bag, None, ".");
        assert!(!defaults.iter().any(|(name, _)| *name == keys::PACKAGE));
    }

    #[test]
    fn title_defaults_from_artifact_id() {
        let bag = PropertyBag::new().with(keys::ARTIFACT_ID, "mysite");
        let defaults = ProjectGenerator.defaults(&bag, None, ".");
        assert!(defaults.contains(&(keys::APP_TITLE, "mysite".into())));
    }

    #[test]
    fn root_requests_the_platform_api() {
        let requests = ProjectGenerator.artifact_requests(Platform::Cloud);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].key, keys::PLATFORM_API_VERSION);
        assert_eq!(requests[0].coordinate.artifact_id, "aem-sdk-api");
    }
}
