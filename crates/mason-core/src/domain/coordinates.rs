//! Platform-keyed artifact coordinate table.
//!
//! A pure lookup, no mutable state. Which *version* of a coordinate is
//! current is the metadata service's business (`application::ports`);
//! this table only knows which coordinate applies on which platform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Platform;

/// A (groupId, artifactId) pair identifying a publishable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// The platform API a bundle compiles against.
pub const fn platform_api(platform: Platform) -> ArtifactCoordinate {
    match platform {
        Platform::Cloud => ArtifactCoordinate {
            group_id: "com.adobe.aem",
            artifact_id: "aem-sdk-api",
        },
        Platform::V65 => ArtifactCoordinate {
            group_id: "com.adobe.aem",
            artifact_id: "uber-jar",
        },
    }
}

/// The HTTP testing-client stack integration tests run on.
pub const fn testing_clients(platform: Platform) -> ArtifactCoordinate {
    match platform {
        Platform::Cloud => ArtifactCoordinate {
            group_id: "com.adobe.cq",
            artifact_id: "aem-cloud-testing-clients",
        },
        Platform::V65 => ArtifactCoordinate {
            group_id: "com.adobe.cq",
            artifact_id: "cq-testing-clients-65",
        },
    }
}

/// One metadata lookup a generator needs before it can write: the
/// coordinate to resolve and the context key its version lands under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactRequest {
    pub key: &'static str,
    pub coordinate: ArtifactCoordinate,
}

/// What the metadata service answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}
