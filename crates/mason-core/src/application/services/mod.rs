//! Application services.
//!
//! One service so far: the composition engine. It owns the injected
//! port implementations and drives generator nodes through their
//! lifecycle.

pub mod compose;

pub use compose::{
    ComposeReport, ComposeRequest, ComposeService, ModuleFailure, ModuleOutcome, ModuleRequest,
};
