//! Implementation of the `mason add` command.
//!
//! Re-runs root composition against an existing project for one extra
//! module. Project-wide properties come from the persisted store and
//! the build descriptor; the singleton invariant is always re-checked
//! against the persisted records rather than trusted.

use tracing::{info, instrument};

use mason_core::application::{ComposeRequest, ModuleRequest};
use mason_core::domain::{ModuleKind, PropertyBag, keys};

use crate::{
    cli::{AddArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::{build_engine, confirm, report_outcome};

/// Execute the `mason add` command.
#[instrument(skip_all, fields(kind = %ModuleKind::from(args.kind), dir = %args.dir.display()))]
pub fn execute(
    args: AddArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let kind = ModuleKind::from(args.kind);

    // A project must exist here — a pom or a module store marks one.
    if !args.dir.join("pom.xml").exists() && !args.dir.join(".mason.toml").exists() {
        return Err(CliError::ProjectNotFound {
            path: args.dir.clone(),
        });
    }

    let path = args
        .path
        .clone()
        .unwrap_or_else(|| kind.default_path().to_string());

    if !global.quiet && !args.yes {
        output.header("Adding module")?;
        output.print(&format!("  kind      {kind}"))?;
        output.print(&format!("  path      {path}"))?;
        output.print(&format!("  project   {}", args.dir.display()))?;
        output.print("")?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let mut module_options = PropertyBag::new();
    if args.publish {
        module_options.set(keys::PUBLISH, true);
    }
    if args.examples {
        module_options.set(keys::EXAMPLES, true);
    }

    let engine = build_engine(&args.dir, &config, args.defaults, global.quiet)?;

    info!(%kind, %path, "adding module");
    let report = engine
        .compose(ComposeRequest {
            project_root: args.dir.clone(),
            options: PropertyBag::new(),
            modules: vec![
                ModuleRequest::new(kind)
                    .with_path(path)
                    .with_options(module_options),
            ],
            use_defaults: args.defaults,
        })
        .map_err(CliError::Core)?;

    report_outcome(&report, &output)?;
    output.success(&format!("Module '{kind}' added!"))?;
    Ok(())
}
