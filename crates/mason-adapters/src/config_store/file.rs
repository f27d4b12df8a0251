//! TOML-backed configuration store: `.mason.toml` at the project root.
//!
//! The file holds the project-wide property bag plus one table per
//! module record. Reads always go to disk so concurrent invocations see
//! each other's records; writes rewrite the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use mason_core::application::ApplicationError;
use mason_core::application::ports::ConfigStore;
use mason_core::domain::{ModuleRecord, ModuleRecords, PropertyBag};
use mason_core::error::MasonResult;

const STORE_FILE: &str = ".mason.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    project: PropertyBag,
    #[serde(default)]
    modules: ModuleRecords,
}

/// Production config store, one `.mason.toml` per project.
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// Store for the project rooted at `project_root`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            path: project_root.as_ref().join(STORE_FILE),
        }
    }

    /// The backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> MasonResult<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| ApplicationError::StoreError {
            reason: format!("cannot read {}: {e}", self.path.display()),
        })?;
        toml::from_str(&raw).map_err(|e| {
            ApplicationError::StoreError {
                reason: format!("cannot parse {}: {e}", self.path.display()),
            }
            .into()
        })
    }

    fn save(&self, store: &StoreFile) -> MasonResult<()> {
        let raw = toml::to_string_pretty(store).map_err(|e| ApplicationError::StoreError {
            reason: format!("cannot serialise store: {e}"),
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ApplicationError::StoreError {
                reason: format!("cannot create {}: {e}", parent.display()),
            })?;
        }
        fs::write(&self.path, raw).map_err(|e| {
            ApplicationError::StoreError {
                reason: format!("cannot write {}: {e}", self.path.display()),
            }
            .into()
        })
    }
}

impl ConfigStore for TomlConfigStore {
    fn project(&self) -> MasonResult<PropertyBag> {
        Ok(self.load()?.project)
    }

    fn set_project(&self, bag: &PropertyBag) -> MasonResult<()> {
        let mut store = self.load()?;
        store.project = bag.clone();
        debug!(path = %self.path.display(), "persisting project configuration");
        self.save(&store)
    }

    fn modules(&self) -> MasonResult<ModuleRecords> {
        Ok(self.load()?.modules)
    }

    fn set_module(&self, record: &ModuleRecord) -> MasonResult<()> {
        let mut store = self.load()?;
        store.modules.insert(record.path.clone(), record.clone());
        debug!(path = %record.path, kind = %record.kind, "persisting module record");
        self.save(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::{ModuleKind, keys};

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::new(dir.path());

        assert!(store.project().unwrap().is_empty());
        assert!(store.modules().unwrap().is_empty());
    }

    #[test]
    fn project_bag_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::new(dir.path());

        let bag = PropertyBag::new()
            .with(keys::GROUP_ID, "com.example")
            .with(keys::EXAMPLES, true);
        store.set_project(&bag).unwrap();

        assert_eq!(store.project().unwrap(), bag);
    }

    #[test]
    fn module_records_round_trip_and_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::new(dir.path());

        store
            .set_module(&ModuleRecord::new(
                "core",
                ModuleKind::App,
                PropertyBag::new().with(keys::ARTIFACT_ID, "example.core"),
            ))
            .unwrap();
        store
            .set_module(&ModuleRecord::new(
                "it.tests",
                ModuleKind::ItTests,
                PropertyBag::new(),
            ))
            .unwrap();

        let records = store.modules().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records["core"].kind, ModuleKind::App);
        assert_eq!(
            records["core"].properties.get_str(keys::ARTIFACT_ID),
            Some("example.core")
        );
    }

    #[test]
    fn set_module_is_idempotent_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::new(dir.path());

        let record = ModuleRecord::new("it.tests", ModuleKind::ItTests, PropertyBag::new());
        store.set_module(&record).unwrap();
        store.set_module(&record).unwrap();

        assert_eq!(store.modules().unwrap().len(), 1);
    }

    #[test]
    fn corrupted_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "not [valid toml").unwrap();

        let store = TomlConfigStore::new(dir.path());
        assert!(store.project().is_err());
    }
}
