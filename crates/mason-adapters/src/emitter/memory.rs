//! In-memory emission sink for testing.

use std::sync::{Arc, RwLock};

use mason_core::application::ports::TemplateEmitter;
use mason_core::domain::{PropertyBag, TemplateId};
use mason_core::error::MasonResult;

use super::{lookup, render};

/// One rendered file.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedFile {
    pub template: String,
    pub path: String,
    pub content: String,
}

/// Records what would have been written, fully rendered.
#[derive(Clone, Default)]
pub struct MemoryEmitter {
    files: Arc<RwLock<Vec<EmittedFile>>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<EmittedFile> {
        self.files.read().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.files.read().unwrap().len()
    }

    /// The rendered content at `path`, if emitted.
    pub fn content_of(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap()
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.clone())
    }

    pub fn paths(&self) -> Vec<String> {
        self.files
            .read()
            .unwrap()
            .iter()
            .map(|f| f.path.clone())
            .collect()
    }
}

impl TemplateEmitter for MemoryEmitter {
    fn emit(&self, template: TemplateId, context: &PropertyBag) -> MasonResult<()> {
        let spec = lookup(template)?;
        self.files.write().unwrap().push(EmittedFile {
            template: template.to_string(),
            path: render(spec.path, context),
            content: render(spec.body, context),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::keys;

    #[test]
    fn records_rendered_path_and_content() {
        let emitter = MemoryEmitter::new();
        let context = PropertyBag::new()
            .with(keys::MODULE_PATH, "dispatcher")
            .with(keys::GROUP_ID, "com.example")
            .with(keys::PARENT_ARTIFACT_ID, "example")
            .with(keys::ARTIFACT_ID, "example.dispatcher")
            .with(keys::VERSION, "1.0.0")
            .with(keys::APP_TITLE, "Example");

        emitter
            .emit(TemplateId::new("dispatcher/author-farm"), &context)
            .unwrap();

        let files = emitter.files();
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            "dispatcher/src/conf.dispatcher.d/farms/author.farm"
        );
        assert!(files[0].content.contains("/content/example/*"));
    }

    #[test]
    fn clones_share_the_record() {
        let emitter = MemoryEmitter::new();
        let handle = emitter.clone();
        let context = PropertyBag::new().with(keys::APP_TITLE, "x").with(
            keys::AEM_VERSION,
            "cloud",
        );

        emitter
            .emit(TemplateId::new("project/readme"), &context)
            .unwrap();
        assert_eq!(handle.count(), 1);
    }
}
