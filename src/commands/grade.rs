//! `netgrade grade` command

use netgrade_core::config::Rubric;
use netgrade_core::error::Result;
use netgrade_core::extract::ConfigInput;
use netgrade_core::grade::{grade, GradeRequest};
use netgrade_core::report::{render_summary, OutputFormat};
use tracing::info;

use super::CommandContext;
use crate::cli::GradeArgs;

pub fn execute(ctx: &CommandContext, args: &GradeArgs) -> Result<()> {
    let rubric = match &args.rubric {
        Some(path) => Rubric::load(path)?,
        None => Rubric::default(),
    };

    let mut request = GradeRequest::new(
        ConfigInput::from_path(&args.master),
        ConfigInput::from_path(&args.student),
        args.prefix.clone(),
    )
    .with_neighbors(
        args.master_neighbors.as_ref().map(ConfigInput::from_path),
        args.student_neighbors.as_ref().map(ConfigInput::from_path),
    );
    if let Some(prefix) = &args.master_prefix {
        request = request.with_master_prefix(prefix.clone());
    }

    let summary = grade(&request, &rubric)?;
    info!(
        final_score = summary.final_score,
        routers = summary.num_routers,
        elapsed = ?ctx.start.elapsed(),
        "graded submission"
    );

    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Human => {
            println!("{}", render_summary(&summary));
        }
    }
    Ok(())
}
