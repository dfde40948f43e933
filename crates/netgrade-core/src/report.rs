//! Output formats and the plain-text grading report
//!
//! - human: the report an instructor reads or pastes into feedback
//! - json: the serialized [`GradingSummary`]

use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::summary::GradingSummary;
use crate::topology::{EdgeMap, TopologyReport};

/// Output format for netgrade commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(GradeError::invalid_value("output format", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a grading summary as the plain-text report.
///
/// Sections: header with type, router count and final score; per-router
/// scores; per-router feedback lines prefixed with the router id; topology
/// feedback; master and student links.
pub fn render_summary(summary: &GradingSummary) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Type of routing : {}",
        summary.assignment_type.to_string().to_uppercase()
    )
    .unwrap();
    writeln!(out, "Number of Router : {}", summary.num_routers).unwrap();
    writeln!(out, "final score : {:?}", summary.final_score).unwrap();
    out.push('\n');

    out.push_str("score breakdown :\n");
    for (id, grade) in &summary.per_router {
        writeln!(out, "{} : {:?}", id, grade.score).unwrap();
    }
    out.push('\n');

    out.push_str("Feedback :\n");
    for (id, grade) in &summary.per_router {
        for line in &grade.feedback {
            writeln!(out, "{} : {}", id, line).unwrap();
        }
    }

    out.push_str("\nTopology :\n");
    for line in &summary.topology_feedback {
        writeln!(out, "{}", line).unwrap();
    }

    out.push_str("\nTopology (Master):\n");
    write_edges(&mut out, &summary.master_edges);
    out.push_str("\nTopology (Student):\n");
    write_edges(&mut out, &summary.student_edges);

    out.trim_end().to_string()
}

/// Render the inferred topology of one submission
pub fn render_topology(report: &TopologyReport) -> String {
    let mut out = String::new();

    out.push_str("Routers :\n");
    for (id, nets) in &report.routers {
        let nets = nets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{} : {}", id, nets).unwrap();
    }

    out.push_str("\nLinks :\n");
    write_edges(&mut out, &report.edges);

    write!(
        out,
        "\nConnected : {}",
        if report.connected { "yes" } else { "no" }
    )
    .unwrap();
    out
}

fn write_edges(out: &mut String, edges: &EdgeMap) {
    for (link, net) in edges {
        writeln!(out, "{} : {}", link, net).unwrap();
    }
}
