//! Command handlers, one module per subcommand.

pub mod add;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

use std::path::Path;

use mason_adapters::{
    HttpMetadataService, LocalEmitter, PomDescriptorReader, StaticMetadataService,
    TomlConfigStore,
};
use mason_core::application::ComposeService;
use mason_core::application::ports::MetadataService;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::interactive::make_prompter;

/// Wire the composition engine for a project directory.
///
/// One place decides every adapter: TOML store and local emission under
/// the project root, pom descriptor reading, and version metadata from
/// either the configured repository or the built-in offline table.
pub fn build_engine(
    project_root: &Path,
    config: &AppConfig,
    use_defaults: bool,
    quiet: bool,
) -> CliResult<ComposeService> {
    let metadata: Box<dyn MetadataService> = match &config.registry.metadata_url {
        Some(url) => Box::new(HttpMetadataService::new(url).map_err(CliError::Core)?),
        None => Box::new(StaticMetadataService::with_builtin()),
    };

    Ok(ComposeService::new(
        Box::new(TomlConfigStore::new(project_root)),
        Box::new(PomDescriptorReader::new()),
        make_prompter(use_defaults, quiet),
        metadata,
        Box::new(LocalEmitter::new(project_root)),
    ))
}

/// Print per-module outcomes; error when any node failed to reach End.
pub fn report_outcome(
    report: &mason_core::application::ComposeReport,
    output: &crate::output::OutputManager,
) -> CliResult<()> {
    for module in &report.completed {
        output.print(&format!(
            "  \u{2713} {} ({}, {} files)",
            module.kind, module.path, module.templates_emitted
        ))?;
    }

    if report.is_success() {
        return Ok(());
    }

    let mut failed = Vec::new();
    for failure in &report.failed {
        let label = failure
            .kind
            .map_or_else(|| "project".to_string(), |k| k.to_string());
        output.error(&format!("  {} ({}): {}", label, failure.path, failure.error))?;
        failed.push(format!("{label} ({})", failure.path));
    }
    Err(CliError::CompositionFailed { failed })
}

/// Read a `[Y/n]` confirmation from stdin.
pub fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
