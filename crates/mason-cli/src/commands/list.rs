//! Implementation of the `mason list` command.

use serde::Serialize;

use mason_core::domain::ModuleKind;

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct KindInfo {
    kind: &'static str,
    singleton: bool,
    default_path: &'static str,
    description: &'static str,
}

fn kind_rows() -> Vec<KindInfo> {
    ModuleKind::ALL
        .iter()
        .map(|kind| KindInfo {
            kind: kind.as_str(),
            singleton: kind.is_singleton(),
            default_path: kind.default_path(),
            description: kind.description(),
        })
        .collect()
}

pub fn execute(args: ListArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let rows = kind_rows();

    match args.format {
        ListFormat::Table => {
            output.header("Available module kinds:")?;
            for row in &rows {
                let marker = if row.singleton { " (singleton)" } else { "" };
                output.print(&format!(
                    "  {:<12} {:<12} {}{}",
                    row.kind, row.default_path, row.description, marker
                ))?;
            }
        }

        ListFormat::Json => {
            // Serialised to stdout directly (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY
            // pipes).
            let json =
                serde_json::to_string_pretty(&rows).map_err(|e| CliError::InvalidInput {
                    message: format!("cannot serialise kind list: {e}"),
                })?;
            println!("{json}");
        }

        ListFormat::List => {
            for row in &rows {
                println!("{}", row.kind);
            }
        }

        ListFormat::Csv => {
            println!("kind,singleton,default_path");
            for row in &rows {
                println!("{},{},{}", row.kind, row.singleton, row.default_path);
            }
        }
    }

    Ok(())
}
