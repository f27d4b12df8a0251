//! Persisted module records and the cross-module invariant check.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::properties::PropertyBag;
use crate::domain::value_objects::ModuleKind;

/// Persisted metadata for one configured module.
///
/// Created when a module finishes its Configuring phase; read back at
/// root-composition time to enforce cardinality invariants. Records are
/// never deleted by this system — removing a module is a filesystem
/// concern outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Project-relative module location; the unique key.
    pub path: String,
    pub kind: ModuleKind,
    #[serde(default)]
    pub properties: PropertyBag,
}

impl ModuleRecord {
    pub fn new(path: impl Into<String>, kind: ModuleKind, properties: PropertyBag) -> Self {
        Self {
            path: path.into(),
            kind,
            properties,
        }
    }
}

/// The set of records the invariant check runs over, keyed by path.
pub type ModuleRecords = BTreeMap<String, ModuleRecord>;

/// Reject a candidate module that would duplicate a singleton kind.
///
/// An existing record with the same singleton kind at a *different* path
/// is a violation; the same path is idempotent re-configuration and
/// passes. Non-singleton kinds always pass. Runs only at the true root
/// of composition — children inherit the root's already-validated state.
pub fn check_singleton(
    existing: &ModuleRecords,
    kind: ModuleKind,
    path: &str,
) -> Result<(), DomainError> {
    if !kind.is_singleton() {
        return Ok(());
    }

    match existing.values().find(|r| r.kind == kind && r.path != path) {
        Some(conflict) => Err(DomainError::DuplicateModule {
            kind: kind.to_string(),
            existing: conflict.path.clone(),
            candidate: path.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(entries: &[(&str, ModuleKind)]) -> ModuleRecords {
        entries
            .iter()
            .map(|(path, kind)| {
                (
                    path.to_string(),
                    ModuleRecord::new(*path, *kind, PropertyBag::new()),
                )
            })
            .collect()
    }

    #[test]
    fn second_singleton_at_different_path_is_rejected() {
        let existing = records(&[("it", ModuleKind::ItTests)]);

        let err = check_singleton(&existing, ModuleKind::ItTests, "it.tests").unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateModule {
                kind: "tests-it".into(),
                existing: "it".into(),
                candidate: "it.tests".into(),
            }
        );
    }

    #[test]
    fn same_path_reconfiguration_is_idempotent() {
        let existing = records(&[("it", ModuleKind::ItTests)]);
        assert!(check_singleton(&existing, ModuleKind::ItTests, "it").is_ok());
    }

    #[test]
    fn non_singleton_kinds_may_repeat() {
        let existing = records(&[("core", ModuleKind::App)]);
        assert!(check_singleton(&existing, ModuleKind::App, "extras").is_ok());
    }

    #[test]
    fn unrelated_kinds_do_not_conflict() {
        let existing = records(&[("it", ModuleKind::ItTests), ("core", ModuleKind::App)]);
        assert!(check_singleton(&existing, ModuleKind::Dispatcher, "dispatcher").is_ok());
    }

    #[test]
    fn empty_record_set_always_passes() {
        assert!(check_singleton(&ModuleRecords::new(), ModuleKind::ItTests, "it").is_ok());
    }
}
