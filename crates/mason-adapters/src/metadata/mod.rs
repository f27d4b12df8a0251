//! Artifact-metadata service adapters.

mod http;
mod static_table;

pub use http::HttpMetadataService;
pub use static_table::StaticMetadataService;
