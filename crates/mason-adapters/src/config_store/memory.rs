//! In-memory config store for testing.

use std::sync::{Arc, RwLock};

use mason_core::application::ApplicationError;
use mason_core::application::ports::ConfigStore;
use mason_core::domain::{ModuleRecord, ModuleRecords, PropertyBag};
use mason_core::error::MasonResult;

#[derive(Debug, Default)]
struct Inner {
    project: PropertyBag,
    modules: ModuleRecords,
}

/// Thread-safe in-memory twin of [`super::TomlConfigStore`].
#[derive(Clone, Default)]
pub struct MemoryConfigStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a module record (testing helper).
    pub fn with_record(self, record: ModuleRecord) -> Self {
        self.inner
            .write()
            .unwrap()
            .modules
            .insert(record.path.clone(), record);
        self
    }

    /// Number of persisted module records.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigStore for MemoryConfigStore {
    fn project(&self) -> MasonResult<PropertyBag> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreError {
                reason: "store lock poisoned".into(),
            })?;
        Ok(inner.project.clone())
    }

    fn set_project(&self, bag: &PropertyBag) -> MasonResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreError {
                reason: "store lock poisoned".into(),
            })?;
        inner.project = bag.clone();
        Ok(())
    }

    fn modules(&self) -> MasonResult<ModuleRecords> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreError {
                reason: "store lock poisoned".into(),
            })?;
        Ok(inner.modules.clone())
    }

    fn set_module(&self, record: &ModuleRecord) -> MasonResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreError {
                reason: "store lock poisoned".into(),
            })?;
        inner.modules.insert(record.path.clone(), record.clone());
        Ok(())
    }
}
