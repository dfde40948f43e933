//! Netgrade Core Library
//!
//! Grades router-configuration submissions against a master solution:
//! config extraction, parsing, topology inference, and scoring.

pub mod config;
pub mod error;
pub mod extract;
pub mod grade;
pub mod graph;
pub mod logging;
pub mod net;
pub mod normalize;
pub mod parse;
pub mod report;
pub mod summary;
pub mod text;
pub mod topology;

pub use config::Rubric;
pub use error::{GradeError, Result};
pub use extract::{ConfigInput, ConfigSet};
pub use grade::{grade, grade_sets, AssignmentType, GradeOptions, GradeRequest};
pub use summary::{GradingSummary, RouterGrade};
