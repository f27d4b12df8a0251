//! Build-descriptor reader: flat properties out of an existing `pom.xml`.
//!
//! Only the coordinates and the target-platform property are lifted; the
//! rest of the pom is none of our business. A missing descriptor reads
//! as an empty bag — that is the normal fresh-project case.

use std::fs;
use std::path::Path;

use tracing::debug;

use mason_core::application::ApplicationError;
use mason_core::application::ports::DescriptorReader;
use mason_core::domain::{PropertyBag, keys};
use mason_core::error::MasonResult;

use crate::xmlish;

pub struct PomDescriptorReader;

impl PomDescriptorReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PomDescriptorReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorReader for PomDescriptorReader {
    fn read(&self, project_root: &Path) -> MasonResult<PropertyBag> {
        let pom_path = project_root.join("pom.xml");
        if !pom_path.exists() {
            return Ok(PropertyBag::new());
        }

        let raw = fs::read_to_string(&pom_path).map_err(|e| ApplicationError::DescriptorError {
            reason: format!("cannot read {}: {e}", pom_path.display()),
        })?;

        let bag = parse_descriptor(&raw);
        debug!(path = %pom_path.display(), properties = bag.len(), "descriptor read");
        Ok(bag)
    }
}

fn parse_descriptor(pom: &str) -> PropertyBag {
    // The <parent> block carries the parent's coordinates; drop it so the
    // first match is this project's own.
    let own = xmlish::strip_block(pom, "parent");

    let mut bag = PropertyBag::new();
    for (tag, key) in [
        ("groupId", keys::GROUP_ID),
        ("artifactId", keys::ARTIFACT_ID),
        ("version", keys::VERSION),
    ] {
        if let Some(value) = xmlish::first_tag(&own, tag) {
            bag.set(key, value);
        }
    }
    // Target platform, by property convention. Whatever is found here is
    // still subject to the validation pass — a bogus tag is discarded
    // there, not trusted.
    if let Some(value) = xmlish::first_tag(&own, "aem.version") {
        bag.set(keys::AEM_VERSION, value);
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <parent>
        <groupId>org.other</groupId>
        <artifactId>parent-pom</artifactId>
        <version>9</version>
    </parent>
    <groupId>com.mysite</groupId>
    <artifactId>mysite</artifactId>
    <version>1.2.0-SNAPSHOT</version>
    <properties>
        <aem.version>cloud</aem.version>
    </properties>
</project>
"#;

    #[test]
    fn own_coordinates_win_over_parent_block() {
        let bag = parse_descriptor(POM);
        assert_eq!(bag.get_str(keys::GROUP_ID), Some("com.mysite"));
        assert_eq!(bag.get_str(keys::ARTIFACT_ID), Some("mysite"));
        assert_eq!(bag.get_str(keys::VERSION), Some("1.2.0-SNAPSHOT"));
    }

    #[test]
    fn platform_property_is_lifted() {
        let bag = parse_descriptor(POM);
        assert_eq!(bag.get_str(keys::AEM_VERSION), Some("cloud"));
    }

    #[test]
    fn absent_tags_stay_absent() {
        let bag = parse_descriptor("<project><groupId>g</groupId></project>");
        assert_eq!(bag.get_str(keys::GROUP_ID), Some("g"));
        assert!(!bag.contains(keys::VERSION));
        assert!(!bag.contains(keys::AEM_VERSION));
    }

    #[test]
    fn missing_pom_reads_as_empty_bag() {
        let dir = tempfile::tempdir().unwrap();
        let bag = PomDescriptorReader::new().read(dir.path()).unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn pom_on_disk_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pom.xml"), POM).unwrap();

        let bag = PomDescriptorReader::new().read(dir.path()).unwrap();
        assert_eq!(bag.get_str(keys::ARTIFACT_ID), Some("mysite"));
    }
}
