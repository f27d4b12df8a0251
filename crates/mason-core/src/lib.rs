//! mason Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the mason
//! project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           mason-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ComposeService + GeneratorNodes)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Store, Descriptor, Prompt, Metadata,   │
//! │             Emitter)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     mason-adapters (Infrastructure)     │
//! │  (TomlConfigStore, LocalEmitter, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PropertyBag, ModuleRecord, Selector)   │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mason_core::{
//!     application::{ComposeRequest, ComposeService, ModuleRequest},
//!     domain::{ModuleKind, PropertyBag, keys},
//! };
//!
//! // 1. Describe the invocation
//! let request = ComposeRequest {
//!     project_root: "./mysite".into(),
//!     options: PropertyBag::new()
//!         .with(keys::GROUP_ID, "com.mysite")
//!         .with(keys::ARTIFACT_ID, "mysite"),
//!     modules: vec![
//!         ModuleRequest::new(ModuleKind::App),
//!         ModuleRequest::new(ModuleKind::ItTests),
//!     ],
//!     use_defaults: true,
//! };
//!
//! // 2. Use the engine (with injected adapters)
//! let service = ComposeService::new(store, descriptor, prompter, metadata, emitter);
//! let report = service.compose(request).unwrap();
//! assert!(report.is_success());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComposeReport, ComposeRequest, ComposeService, GeneratorRegistry, ModuleGenerator,
        ModuleRequest,
        ports::{ConfigStore, DescriptorReader, MetadataService, Prompter, TemplateEmitter},
    };
    pub use crate::domain::{
        ArtifactCoordinate, ModuleKind, ModuleRecord, Platform, PropertyBag, TemplateId, Value,
        VersionMetadata, keys,
    };
    pub use crate::error::{MasonError, MasonResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
