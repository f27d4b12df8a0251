//! Application layer for mason.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (the composition engine)
//! - **Generators**: Per-module-kind specialization behind one trait
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ComposeReport, ComposeRequest, ComposeService, ModuleFailure, ModuleOutcome, ModuleRequest,
};

// Re-export generator machinery (for adapter wiring and tests)
pub use generators::{GeneratorRegistry, ModuleGenerator};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ConfigStore, DescriptorReader, MetadataService, PromptRequest, Prompter, TemplateEmitter,
};

pub use error::ApplicationError;
