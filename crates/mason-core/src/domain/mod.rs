// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for mason.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O — prompting, persistence, metadata lookups, file emission — is
//! handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror/serde
//! - **Immutable resolution**: a resolved PropertyBag is sealed per node
//!
// Public API - what the world sees
pub mod coordinates;
pub mod error;
pub mod properties;
pub mod registry;
pub mod templates;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use coordinates::{ArtifactCoordinate, ArtifactRequest, VersionMetadata};
pub use error::{DomainError, ErrorCategory};
pub use properties::{
    Discarded, OptionKind, OptionSpec, PropertyBag, PropertySources, Resolution, Value, keys,
    resolve,
};
pub use registry::{ModuleRecord, ModuleRecords, check_singleton};
pub use templates::{TemplateId, module_templates, project_templates};
pub use value_objects::{ModuleKind, Platform};
