//! Master vs. student topology comparison

use crate::config::TopologyRubric;
use crate::graph::all_reachable;
use crate::topology::EdgeMap;

use super::sheet::points;

/// Feedback and deduction from comparing the two edge sets
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyOutcome {
    pub feedback: Vec<String>,
    pub deduction: f64,
}

impl TopologyOutcome {
    fn new(deduction: f64, message: String) -> Self {
        Self {
            feedback: vec![message],
            deduction,
        }
    }
}

/// Compare the student's inferred links against the master's.
///
/// A partitioned student network short-circuits the link count.
pub fn compare_topology(
    master: &EdgeMap,
    student: &EdgeMap,
    rubric: &TopologyRubric,
) -> TopologyOutcome {
    if !all_reachable(student) {
        return TopologyOutcome::new(
            rubric.partition_deduction,
            "❌ Network partition detected".to_string(),
        );
    }

    let total = master.len();
    let missing = master.keys().filter(|key| !student.contains_key(key)).count();

    match missing {
        0 => TopologyOutcome::new(0.0, "✅ Topology matches!".to_string()),
        n if n as f64 >= total as f64 / 2.0 => TopologyOutcome::new(
            rubric.half_missing_deduction,
            format!(
                "❌ {} missing links ≥ half: −{} pts",
                n,
                points(rubric.half_missing_deduction)
            ),
        ),
        n if n >= 2 => TopologyOutcome::new(
            rubric.several_missing_deduction,
            format!(
                "❌ {} missing links: −{} pts",
                n,
                points(rubric.several_missing_deduction)
            ),
        ),
        _ => TopologyOutcome::new(
            rubric.single_missing_deduction,
            format!(
                "❌ 1 missing link: −{} pts",
                points(rubric.single_missing_deduction)
            ),
        ),
    }
}
