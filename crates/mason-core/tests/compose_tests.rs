//! Engine-level tests for the composition service.
//!
//! These run the full lifecycle against in-memory port stubs, with the
//! metadata service mocked so call counts and failure paths are exact.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use mason_core::application::ports::{
    ConfigStore, DescriptorReader, PromptRequest, Prompter, TemplateEmitter,
};
use mason_core::application::{
    ApplicationError, ComposeRequest, ComposeService, MetadataService, ModuleRequest,
};
use mason_core::domain::{
    ArtifactCoordinate, DomainError, ModuleKind, ModuleRecord, ModuleRecords, Platform,
    PropertyBag, TemplateId, VersionMetadata, keys,
};
use mason_core::error::{MasonError, MasonResult};

// ── port stubs ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<RwLock<(PropertyBag, ModuleRecords)>>,
}

impl MemoryStore {
    fn with_record(self, record: ModuleRecord) -> Self {
        self.inner
            .write()
            .unwrap()
            .1
            .insert(record.path.clone(), record);
        self
    }

    fn records(&self) -> ModuleRecords {
        self.inner.read().unwrap().1.clone()
    }
}

impl ConfigStore for MemoryStore {
    fn project(&self) -> MasonResult<PropertyBag> {
        Ok(self.inner.read().unwrap().0.clone())
    }

    fn set_project(&self, bag: &PropertyBag) -> MasonResult<()> {
        self.inner.write().unwrap().0 = bag.clone();
        Ok(())
    }

    fn modules(&self) -> MasonResult<ModuleRecords> {
        Ok(self.inner.read().unwrap().1.clone())
    }

    fn set_module(&self, record: &ModuleRecord) -> MasonResult<()> {
        self.inner
            .write()
            .unwrap()
            .1
            .insert(record.path.clone(), record.clone());
        Ok(())
    }
}

struct NoDescriptor;

impl DescriptorReader for NoDescriptor {
    fn read(&self, _root: &std::path::Path) -> MasonResult<PropertyBag> {
        Ok(PropertyBag::new())
    }
}

/// Fails on any prompt — used where zero prompting is the expectation.
struct UnattendedPrompter;

impl Prompter for UnattendedPrompter {
    fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String> {
        Err(ApplicationError::PromptFailed {
            name: request.name.to_string(),
            reason: "prompting disabled in this test".into(),
        }
        .into())
    }
}

/// Pops scripted answers; errors when the script runs dry.
struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, request: &PromptRequest<'_>) -> MasonResult<String> {
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            MasonError::from(ApplicationError::PromptFailed {
                name: request.name.to_string(),
                reason: "script exhausted".into(),
            })
        })
    }
}

#[derive(Clone, Default)]
struct RecordingEmitter {
    emitted: Arc<Mutex<Vec<(TemplateId, PropertyBag)>>>,
}

impl RecordingEmitter {
    fn ids(&self) -> Vec<String> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.as_str().to_string())
            .collect()
    }

    fn context_of(&self, id: &str) -> Option<PropertyBag> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .find(|(t, _)| t.as_str() == id)
            .map(|(_, bag)| bag.clone())
    }

    fn count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }
}

impl TemplateEmitter for RecordingEmitter {
    fn emit(&self, template: TemplateId, context: &PropertyBag) -> MasonResult<()> {
        self.emitted
            .lock()
            .unwrap()
            .push((template, context.clone()));
        Ok(())
    }
}

mockall::mock! {
    pub Metadata {}

    impl MetadataService for Metadata {
        fn latest(
            &self,
            coordinate: &ArtifactCoordinate,
            platform: Platform,
        ) -> MasonResult<VersionMetadata>;
    }
}

fn answer_for(coordinate: &ArtifactCoordinate) -> VersionMetadata {
    let version = match coordinate.artifact_id {
        "aem-sdk-api" => "2025.7.21000.20250714T084300Z-250600",
        "aem-cloud-testing-clients" => "1.3.2",
        "uber-jar" => "6.5.21",
        _ => "5.15.0",
    };
    VersionMetadata {
        group_id: coordinate.group_id.to_string(),
        artifact_id: coordinate.artifact_id.to_string(),
        version: version.to_string(),
    }
}

fn service_with(
    store: MemoryStore,
    prompter: Box<dyn Prompter>,
    metadata: MockMetadata,
    emitter: RecordingEmitter,
) -> ComposeService {
    ComposeService::new(
        Box::new(store),
        Box::new(NoDescriptor),
        prompter,
        Box::new(metadata),
        Box::new(emitter),
    )
}

fn project_options() -> PropertyBag {
    PropertyBag::new()
        .with(keys::GROUP_ID, "com.example")
        .with(keys::ARTIFACT_ID, "example")
        .with(keys::VERSION, "1.0.0")
        .with(keys::AEM_VERSION, "cloud")
}

// ── end-to-end ────────────────────────────────────────────────────────────────

#[test]
fn defaults_compose_reaches_end_for_both_modules_without_prompting() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();

    let mut metadata = MockMetadata::new();
    // Root and app both pin the platform API; tests-it pulls it again
    // plus the testing clients. All on the cloud platform.
    metadata
        .expect_latest()
        .withf(|c, p| c.artifact_id == "aem-sdk-api" && *p == Platform::Cloud)
        .times(3)
        .returning(|c, _| Ok(answer_for(c)));
    metadata
        .expect_latest()
        .withf(|c, p| c.artifact_id == "aem-cloud-testing-clients" && *p == Platform::Cloud)
        .times(1)
        .returning(|c, _| Ok(answer_for(c)));

    let service = service_with(
        store.clone(),
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let report = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options: project_options(),
            modules: vec![
                ModuleRequest::new(ModuleKind::App),
                ModuleRequest::new(ModuleKind::ItTests),
            ],
            use_defaults: true,
        })
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.root_templates, 3);

    // Two module records persisted under their default paths.
    let records = store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records["core"].kind, ModuleKind::App);
    assert_eq!(records["it.tests"].kind, ModuleKind::ItTests);

    // Defaults filled the gaps the invocation left open.
    assert_eq!(report.project.get_str(keys::APP_TITLE), Some("example"));
    assert_eq!(report.project.get_str(keys::PACKAGE), Some("com.example"));
    assert_eq!(records["core"].properties.get_bool(keys::EXAMPLES), Some(true));

    // The tests-it pom saw both resolved versions in its context.
    let context = emitter.context_of("tests-it/pom").unwrap();
    assert_eq!(
        context.get_str(keys::TESTING_CLIENT_VERSION),
        Some("1.3.2")
    );
    assert!(context.get_str(keys::PLATFORM_API_VERSION).is_some());
    assert_eq!(context.get_str(keys::MODULE_PATH), Some("it.tests"));

    // Sample code rides on the defaulted examples flag.
    let ids = emitter.ids();
    assert!(ids.contains(&"app/sample-servlet".to_string()));
    // The reactor pom lists both modules.
    let root_pom = emitter.context_of("project/pom").unwrap();
    let module_list = root_pom.get_str(keys::MODULE_LIST).unwrap();
    assert!(module_list.contains("<module>core</module>"));
    assert!(module_list.contains("<module>it.tests</module>"));
}

// ── invariants ────────────────────────────────────────────────────────────────

#[test]
fn duplicate_singleton_fails_before_any_write() {
    let store = MemoryStore::default().with_record(ModuleRecord::new(
        "it",
        ModuleKind::ItTests,
        PropertyBag::new(),
    ));
    let emitter = RecordingEmitter::default();
    let metadata = MockMetadata::new(); // must never be called

    let service = service_with(
        store.clone(),
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let err = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options: project_options(),
            modules: vec![ModuleRequest::new(ModuleKind::ItTests).with_path("it.tests")],
            use_defaults: true,
        })
        .unwrap_err();

    match err {
        MasonError::Domain(DomainError::DuplicateModule {
            kind,
            existing,
            candidate,
        }) => {
            assert_eq!(kind, "tests-it");
            assert_eq!(existing, "it");
            assert_eq!(candidate, "it.tests");
        }
        other => panic!("expected DuplicateModule, got: {other:?}"),
    }

    // Surfaced before any child Writing began.
    assert_eq!(emitter.count(), 0);
}

#[test]
fn same_path_reconfiguration_is_accepted() {
    let store = MemoryStore::default().with_record(ModuleRecord::new(
        "it.tests",
        ModuleKind::ItTests,
        PropertyBag::new().with(keys::ARTIFACT_ID, "example.it.tests"),
    ));
    let emitter = RecordingEmitter::default();

    let mut metadata = MockMetadata::new();
    metadata
        .expect_latest()
        .returning(|c, _| Ok(answer_for(c)));

    let service = service_with(
        store.clone(),
        Box::new(UnattendedPrompter),
        metadata,
        emitter,
    );

    let report = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options: project_options(),
            modules: vec![ModuleRequest::new(ModuleKind::ItTests).with_path("it.tests")],
            use_defaults: true,
        })
        .unwrap();

    assert!(report.is_success());
    assert_eq!(store.records().len(), 1);
}

#[test]
fn two_singleton_candidates_in_one_run_conflict() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();
    let metadata = MockMetadata::new();

    let service = service_with(
        store,
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let err = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options: project_options(),
            modules: vec![
                ModuleRequest::new(ModuleKind::ItTests).with_path("it"),
                ModuleRequest::new(ModuleKind::ItTests).with_path("it.tests"),
            ],
            use_defaults: true,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        MasonError::Domain(DomainError::DuplicateModule { .. })
    ));
    assert_eq!(emitter.count(), 0);
}

// ── resolution failures ───────────────────────────────────────────────────────

#[test]
fn metadata_failure_aborts_only_the_affected_node() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();

    let mut metadata = MockMetadata::new();
    metadata
        .expect_latest()
        .withf(|c, _| c.artifact_id == "aem-sdk-api")
        .returning(|c, _| Ok(answer_for(c)));
    metadata
        .expect_latest()
        .withf(|c, _| c.artifact_id == "aem-cloud-testing-clients")
        .returning(|c, _| {
            Err(ApplicationError::MetadataResolution {
                coordinate: c.to_string(),
                reason: "service unavailable".into(),
            }
            .into())
        });

    let service = service_with(
        store.clone(),
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let report = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options: project_options(),
            modules: vec![
                ModuleRequest::new(ModuleKind::App),
                ModuleRequest::new(ModuleKind::ItTests),
            ],
            use_defaults: true,
        })
        .unwrap();

    // The sibling written before the failure is untouched, the failed
    // node emitted nothing, and the overall outcome is a failure.
    assert!(!report.is_success());
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.completed[0].kind, ModuleKind::App);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].kind, Some(ModuleKind::ItTests));
    assert!(emitter.ids().iter().all(|id| !id.starts_with("tests-it/")));
    // Root still writes — nodes are independent emission units.
    assert!(emitter.ids().contains(&"project/pom".to_string()));
}

// ── prompting ─────────────────────────────────────────────────────────────────

#[test]
fn invalid_answer_is_reprompted_until_valid() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();

    let mut metadata = MockMetadata::new();
    metadata
        .expect_latest()
        .returning(|c, _| Ok(answer_for(c)));

    // Everything but `package` is supplied; the script answers with an
    // invalid package first, then a valid one.
    let prompter = ScriptedPrompter::new(&["com123", "com.mysite"]);
    let options = project_options().with(keys::APP_TITLE, "Example Site");

    let service = ComposeService::new(
        Box::new(store),
        Box::new(NoDescriptor),
        Box::new(prompter),
        Box::new(metadata),
        Box::new(emitter.clone()),
    );

    let report = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options,
            modules: Vec::new(),
            use_defaults: false,
        })
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.project.get_str(keys::PACKAGE), Some("com.mysite"));
    let pom = emitter.context_of("project/pom").unwrap();
    assert_eq!(pom.get_str(keys::PACKAGE_PATH), Some("com/mysite"));
}

#[test]
fn defaults_mode_fails_on_missing_required_property() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();
    let metadata = MockMetadata::new();

    // No group id anywhere and no default for it.
    let options = PropertyBag::new()
        .with(keys::ARTIFACT_ID, "example")
        .with(keys::VERSION, "1.0.0");

    let service = service_with(
        store,
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let err = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options,
            modules: Vec::new(),
            use_defaults: true,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        MasonError::Domain(DomainError::MissingProperty { ref name }) if name == keys::GROUP_ID
    ));
    assert_eq!(emitter.count(), 0);
}

#[test]
fn defaults_mode_fails_loudly_on_discarded_value() {
    let store = MemoryStore::default();
    let emitter = RecordingEmitter::default();
    let metadata = MockMetadata::new();

    // `package` is malformed; in defaults mode it must not be silently
    // replaced by the computed fallback.
    let options = project_options().with(keys::PACKAGE, "com123");

    let service = service_with(
        store,
        Box::new(UnattendedPrompter),
        metadata,
        emitter.clone(),
    );

    let err = service
        .compose(ComposeRequest {
            project_root: "example".into(),
            options,
            modules: Vec::new(),
            use_defaults: true,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        MasonError::Domain(DomainError::InvalidProperty { ref name, ref value, .. })
            if name == keys::PACKAGE && value == "com123"
    ));
    assert_eq!(emitter.count(), 0);
}
