//! Local-filesystem emission sink.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use mason_core::application::ApplicationError;
use mason_core::application::ports::TemplateEmitter;
use mason_core::domain::{PropertyBag, TemplateId};
use mason_core::error::MasonResult;

use super::{lookup, render};

/// Writes rendered templates under a project root.
///
/// Existing files are overwritten: re-running against a project is an
/// explicit reconfiguration, and refusing here would make idempotent
/// re-runs impossible.
pub struct LocalEmitter {
    root: PathBuf,
}

impl LocalEmitter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl TemplateEmitter for LocalEmitter {
    #[instrument(skip_all, fields(template = %template))]
    fn emit(&self, template: TemplateId, context: &PropertyBag) -> MasonResult<()> {
        let spec = lookup(template)?;

        let relative = render(spec.path, context);
        let target = self.root.join(&relative);
        let content = render(spec.body, context);

        let emission_error = |reason: String| {
            ApplicationError::EmissionFailed {
                template: template.to_string(),
                reason,
            }
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| emission_error(format!("mkdir {}: {e}", parent.display())))?;
        }
        fs::write(&target, content)
            .map_err(|e| emission_error(format!("write {}: {e}", target.display())))?;

        debug!(path = %target.display(), "file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::keys;

    fn cloud_context() -> PropertyBag {
        PropertyBag::new()
            .with(keys::GROUP_ID, "com.example")
            .with(keys::ARTIFACT_ID, "example.core")
            .with(keys::PARENT_ARTIFACT_ID, "example")
            .with(keys::VERSION, "1.0.0")
            .with(keys::APP_TITLE, "Example")
            .with(keys::PACKAGE, "com.example")
            .with(keys::PACKAGE_PATH, "com/example")
            .with(keys::MODULE_PATH, "core")
            .with("platformApiGroupId", "com.adobe.aem")
            .with("platformApiArtifactId", "aem-sdk-api")
            .with(keys::PLATFORM_API_VERSION, "2025.7.1")
    }

    #[test]
    fn writes_rendered_file_under_module_path() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = LocalEmitter::new(dir.path());

        emitter
            .emit(TemplateId::new("app/pom"), &cloud_context())
            .unwrap();

        let written = fs::read_to_string(dir.path().join("core/pom.xml")).unwrap();
        assert!(written.contains("<artifactId>example.core</artifactId>"));
        assert!(written.contains("<artifactId>example</artifactId>"));
        assert!(written.contains("<version>2025.7.1</version>"));
        assert!(!written.contains("{{"));
    }

    #[test]
    fn nested_java_paths_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = LocalEmitter::new(dir.path());

        emitter
            .emit(TemplateId::new("app/package-info"), &cloud_context())
            .unwrap();

        let path = dir
            .path()
            .join("core/src/main/java/com/example/core/package-info.java");
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("package com.example.core;"));
    }

    #[test]
    fn reemission_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = LocalEmitter::new(dir.path());

        emitter
            .emit(TemplateId::new("app/pom"), &cloud_context())
            .unwrap();
        let context = cloud_context().with(keys::VERSION, "2.0.0");
        emitter.emit(TemplateId::new("app/pom"), &context).unwrap();

        let written = fs::read_to_string(dir.path().join("core/pom.xml")).unwrap();
        assert!(written.contains("<version>2.0.0</version>"));
    }

    #[test]
    fn unknown_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = LocalEmitter::new(dir.path());
        assert!(
            emitter
                .emit(TemplateId::new("no/such"), &PropertyBag::new())
                .is_err()
        );
    }
}
