//! Static version table.
//!
//! Offline/deterministic metadata source: answers from a fixed table
//! instead of a repository round trip. Used by tests and by invocations
//! that must not touch the network. A coordinate outside the table is a
//! resolution failure, never a guessed version.

use std::collections::HashMap;
use std::sync::RwLock;

use mason_core::application::ApplicationError;
use mason_core::application::ports::MetadataService;
use mason_core::domain::{ArtifactCoordinate, Platform, VersionMetadata};
use mason_core::error::MasonResult;

pub struct StaticMetadataService {
    versions: RwLock<HashMap<(String, String), String>>,
}

impl StaticMetadataService {
    pub fn new() -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Table pre-loaded with the current platform artifacts.
    pub fn with_builtin() -> Self {
        let service = Self::new();
        service.insert("com.adobe.aem", "aem-sdk-api", "2025.7.21000.20250714T084300Z-250600");
        service.insert("com.adobe.aem", "uber-jar", "6.5.21");
        service.insert("com.adobe.cq", "aem-cloud-testing-clients", "1.3.2");
        service.insert("com.adobe.cq", "cq-testing-clients-65", "5.15.0");
        service
    }

    pub fn insert(&self, group_id: &str, artifact_id: &str, version: &str) {
        self.versions.write().unwrap().insert(
            (group_id.to_string(), artifact_id.to_string()),
            version.to_string(),
        );
    }
}

impl Default for StaticMetadataService {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl MetadataService for StaticMetadataService {
    fn latest(
        &self,
        coordinate: &ArtifactCoordinate,
        _platform: Platform,
    ) -> MasonResult<VersionMetadata> {
        let versions = self
            .versions
            .read()
            .map_err(|_| ApplicationError::StoreError {
                reason: "version table lock poisoned".into(),
            })?;

        let key = (
            coordinate.group_id.to_string(),
            coordinate.artifact_id.to_string(),
        );
        versions
            .get(&key)
            .map(|version| VersionMetadata {
                group_id: coordinate.group_id.to_string(),
                artifact_id: coordinate.artifact_id.to_string(),
                version: version.clone(),
            })
            .ok_or_else(|| {
                ApplicationError::MetadataResolution {
                    coordinate: coordinate.to_string(),
                    reason: "not present in the static version table".into(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::coordinates;

    #[test]
    fn builtin_table_answers_cloud_coordinates() {
        let service = StaticMetadataService::with_builtin();
        let meta = service
            .latest(&coordinates::platform_api(Platform::Cloud), Platform::Cloud)
            .unwrap();
        assert_eq!(meta.artifact_id, "aem-sdk-api");
        assert!(!meta.version.is_empty());
    }

    #[test]
    fn unknown_coordinate_is_a_resolution_error() {
        let service = StaticMetadataService::new();
        let err = service
            .latest(&coordinates::platform_api(Platform::Cloud), Platform::Cloud)
            .unwrap_err();
        assert!(err.to_string().contains("aem-sdk-api"));
    }

    #[test]
    fn inserted_versions_are_served() {
        let service = StaticMetadataService::new();
        service.insert("com.adobe.aem", "uber-jar", "6.5.99");
        let meta = service
            .latest(&coordinates::platform_api(Platform::V65), Platform::V65)
            .unwrap();
        assert_eq!(meta.version, "6.5.99");
    }
}
