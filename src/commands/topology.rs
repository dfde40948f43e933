//! `netgrade topology` command

use std::path::Path;

use netgrade_core::error::Result;
use netgrade_core::extract::ConfigInput;
use netgrade_core::report::{render_topology, OutputFormat};
use netgrade_core::topology::survey;

use super::CommandContext;

pub fn execute(ctx: &CommandContext, configs: &Path, prefix: &str) -> Result<()> {
    let input = ConfigInput::from_path(configs);
    let set = input.load_lenient()?;
    if set.is_empty() && !ctx.cli.quiet {
        eprintln!("warning: no .txt configs found in {}", input.name());
    }

    let report = survey(&set, prefix);

    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            println!("{}", render_topology(&report));
        }
    }
    Ok(())
}
