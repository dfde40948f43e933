//! Grading results

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::grade::AssignmentType;
use crate::topology::EdgeMap;

/// Score and feedback for one router
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterGrade {
    /// Rounded to one decimal; may be negative
    pub score: f64,
    /// Section headers followed by their messages
    pub feedback: Vec<String>,
}

/// Aggregate result of one grading run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingSummary {
    pub assignment_type: AssignmentType,
    pub num_routers: usize,
    /// Router id → grade, in master order
    #[serde(serialize_with = "ordered_map")]
    pub per_router: Vec<(String, RouterGrade)>,
    pub routing_score: f64,
    pub topology_feedback: Vec<String>,
    pub topology_deduction: f64,
    pub master_edges: EdgeMap,
    pub student_edges: EdgeMap,
    pub final_score: f64,
}

impl GradingSummary {
    pub fn router(&self, id: &str) -> Option<&RouterGrade> {
        self.per_router
            .iter()
            .find(|(router, _)| router == id)
            .map(|(_, grade)| grade)
    }
}

fn ordered_map<S: Serializer>(
    entries: &[(String, RouterGrade)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (id, grade) in entries {
        map.serialize_entry(id, grade)?;
    }
    map.end()
}
