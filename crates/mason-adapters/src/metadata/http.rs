//! HTTP metadata client against a Maven repository.
//!
//! One GET of `<repo>/<group-as-path>/<artifact>/maven-metadata.xml`
//! per lookup; the answer is `<latest>`, falling back to `<release>`,
//! falling back to the last listed `<version>`. Any failure propagates
//! as a resolution error — the engine never writes a guessed version.

use std::time::Duration;

use tracing::debug;

use mason_core::application::ApplicationError;
use mason_core::application::ports::MetadataService;
use mason_core::domain::{ArtifactCoordinate, Platform, VersionMetadata};
use mason_core::error::{MasonError, MasonResult};

use crate::xmlish;

/// Maven Central; Adobe's public artifacts are mirrored here too.
pub const DEFAULT_REPOSITORY: &str = "https://repo1.maven.org/maven2";

pub struct HttpMetadataService {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpMetadataService {
    /// Client against `base_url` (no trailing slash required).
    pub fn new(base_url: impl Into<String>) -> MasonResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MasonError::Configuration {
                message: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn metadata_url(&self, coordinate: &ArtifactCoordinate) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.base_url,
            coordinate.group_id.replace('.', "/"),
            coordinate.artifact_id,
        )
    }
}

impl MetadataService for HttpMetadataService {
    fn latest(
        &self,
        coordinate: &ArtifactCoordinate,
        _platform: Platform,
    ) -> MasonResult<VersionMetadata> {
        let url = self.metadata_url(coordinate);
        debug!(%url, "fetching version metadata");

        let resolution_error = |reason: String| {
            MasonError::from(ApplicationError::MetadataResolution {
                coordinate: coordinate.to_string(),
                reason,
            })
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| resolution_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(resolution_error(format!("HTTP {}", response.status())));
        }
        let body = response
            .text()
            .map_err(|e| resolution_error(e.to_string()))?;

        let version = latest_in_metadata(&body)
            .ok_or_else(|| resolution_error("metadata lists no versions".into()))?;

        Ok(VersionMetadata {
            group_id: coordinate.group_id.to_string(),
            artifact_id: coordinate.artifact_id.to_string(),
            version: version.to_string(),
        })
    }
}

/// `<latest>`, else `<release>`, else the last `<version>` entry.
fn latest_in_metadata(body: &str) -> Option<&str> {
    xmlish::first_tag(body, "latest")
        .or_else(|| xmlish::first_tag(body, "release"))
        .or_else(|| xmlish::all_tags(body, "version").into_iter().last())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::coordinates;

    #[test]
    fn url_maps_group_dots_to_slashes() {
        let service = HttpMetadataService::new("https://repo.example.com/maven2/").unwrap();
        assert_eq!(
            service.metadata_url(&coordinates::platform_api(Platform::Cloud)),
            "https://repo.example.com/maven2/com/adobe/aem/aem-sdk-api/maven-metadata.xml"
        );
    }

    #[test]
    fn latest_tag_wins() {
        let body = "<metadata><versioning><latest>2.0</latest>\
                    <release>1.9</release><version>1.0</version></versioning></metadata>";
        assert_eq!(latest_in_metadata(body), Some("2.0"));
    }

    #[test]
    fn release_is_the_fallback() {
        let body = "<metadata><versioning><release>1.9</release>\
                    <version>1.0</version></versioning></metadata>";
        assert_eq!(latest_in_metadata(body), Some("1.9"));
    }

    #[test]
    fn last_listed_version_is_the_final_fallback() {
        let body = "<metadata><versioning><versions>\
                    <version>1.0</version><version>1.1</version>\
                    </versions></versioning></metadata>";
        assert_eq!(latest_in_metadata(body), Some("1.1"));
    }

    #[test]
    fn empty_metadata_is_none() {
        assert_eq!(latest_in_metadata("<metadata/>"), None);
    }
}
