//! Implementation of the `mason new` command.
//!
//! Responsibility: translate CLI arguments into a `ComposeRequest`, run
//! the composition engine, and display results. No composition logic
//! lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use mason_core::application::{ComposeRequest, ModuleRequest};
use mason_core::domain::{ModuleKind, PropertyBag, keys, validation};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{build_engine, confirm, report_outcome};

/// Execute the `mason new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Convert CLI args to a `ComposeRequest`
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Run the composition engine
/// 5. Print per-module outcomes and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_dir) = resolve_project_path(&args.name)?;
    validate_project_name(&project_name)?;

    if project_dir.exists() && !args.force {
        return Err(CliError::ProjectExists { path: project_dir });
    }

    // 2. Build the request
    let options = project_options(&args, &config, &project_name);
    let modules = module_requests(&args);

    debug!(
        modules = modules.len(),
        defaults = args.defaults,
        "invocation translated"
    );

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes {
        show_configuration(&options, &modules, &project_dir, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Compose
    let engine = build_engine(&project_dir, &config, args.defaults, global.quiet)?;

    output.header(&format!("Composing '{project_name}'..."))?;
    info!(project = %project_name, path = %project_dir.display(), "composition started");

    let report = engine
        .compose(ComposeRequest {
            project_root: project_dir.clone(),
            options,
            modules,
            use_defaults: args.defaults,
        })
        .map_err(CliError::Core)?;

    // 5. Outcomes + next steps
    report_outcome(&report, &output)?;
    output.success(&format!("Project '{project_name}' composed!"))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {project_name}"))?;
        output.print("  mvn clean install")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    // The leaf doubles as the Maven artifact id, so the artifact-id rule
    // is the one that matters.
    validation::artifact_id(name).map_err(|reason| CliError::InvalidProjectName {
        name: name.into(),
        reason,
    })
}

// ── Request construction ──────────────────────────────────────────────────────

fn project_options(args: &NewArgs, config: &AppConfig, project_name: &str) -> PropertyBag {
    let mut options = PropertyBag::new().with(keys::ARTIFACT_ID, project_name);

    let group_id = args
        .group_id
        .clone()
        .or_else(|| config.defaults.group_id.clone());
    if let Some(group_id) = group_id {
        options.set(keys::GROUP_ID, group_id);
    }
    if let Some(version) = &args.project_version {
        options.set(keys::VERSION, version.clone());
    }
    match args.aem_version {
        Some(platform) => {
            options.set(
                keys::AEM_VERSION,
                mason_core::domain::Platform::from(platform).as_str(),
            );
        }
        None => {
            if let Some(platform) = &config.defaults.aem_version {
                options.set(keys::AEM_VERSION, platform.clone());
            }
        }
    }
    if let Some(package) = &args.package {
        options.set(keys::PACKAGE, package.clone());
    }
    if let Some(title) = &args.app_title {
        options.set(keys::APP_TITLE, title.clone());
    }
    options
}

fn module_requests(args: &NewArgs) -> Vec<ModuleRequest> {
    let kinds: Vec<ModuleKind> = if args.modules.is_empty() {
        vec![ModuleKind::App, ModuleKind::ItTests]
    } else {
        args.modules.iter().map(|k| ModuleKind::from(*k)).collect()
    };

    kinds
        .into_iter()
        .map(|kind| {
            // Flags are only an option source when actually passed;
            // absence leaves them to persisted config or defaults.
            let mut options = PropertyBag::new();
            if args.publish {
                options.set(keys::PUBLISH, true);
            }
            if args.examples {
                options.set(keys::EXAMPLES, true);
            }
            ModuleRequest::new(kind).with_options(options)
        })
        .collect()
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    options: &PropertyBag,
    modules: &[ModuleRequest],
    project_dir: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    for key in [
        keys::GROUP_ID,
        keys::ARTIFACT_ID,
        keys::VERSION,
        keys::AEM_VERSION,
        keys::PACKAGE,
        keys::APP_TITLE,
    ] {
        if let Some(value) = options.get_str(key) {
            out.print(&format!("  {key:<12} {value}"))?;
        }
    }
    let kinds: Vec<&str> = modules.iter().map(|m| m.kind.as_str()).collect();
    out.print(&format!("  {:<12} {}", "modules", kinds.join(", ")))?;
    out.print(&format!("  {:<12} {}", "location", project_dir.display()))?;
    out.print("")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
