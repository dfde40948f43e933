//! Grading a student submission against the master solution
//!
//! Every master router is graded in master order. Shared checks (masks,
//! address format, hostname) apply to all assignments; the routing check is
//! dispatched on the assignment type detected from the master set. The
//! per-router mean is then reduced by the topology comparison.

pub mod checks;
pub mod ospf;
pub mod sheet;
pub mod static_routes;
pub mod topology;

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::Rubric;
use crate::error::Result;
use crate::extract::{ConfigInput, ConfigSet};
use crate::normalize::{normalize_addresses, validate_prefix};
use crate::parse::{parse_neighbor_table, ParsedRouter, RouterConfig};
use crate::summary::{GradingSummary, RouterGrade};
use crate::text::sanitize;
use crate::topology::{build_edges, expected_neighbors, subnet_map};

use self::sheet::{round_tenth, ScoreSheet, Section};
use self::topology::compare_topology;

/// Routing technique the assignment exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Static,
    Ospf,
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentType::Static => write!(f, "static"),
            AssignmentType::Ospf => write!(f, "ospf"),
        }
    }
}

/// Decide the assignment type from the master set and its archive name.
///
/// Static wins over OSPF; a master set showing neither is graded as static.
pub fn detect_assignment_type(master: &[RouterConfig], hint: Option<&str>) -> AssignmentType {
    let hint = hint.map(str::to_lowercase).unwrap_or_default();
    let any_static = master.iter().any(|r| r.parsed().has_static_routes());
    let any_ospf = master.iter().any(|r| r.parsed().runs_ospf);

    if hint.contains("static") || any_static {
        AssignmentType::Static
    } else if hint.contains("ospf") || any_ospf {
        AssignmentType::Ospf
    } else {
        AssignmentType::Static
    }
}

/// A master router's counterpart in the student submission
#[derive(Debug, Clone, Copy)]
pub enum RouterSlot<'a> {
    Present(&'a RouterConfig),
    Absent,
}

impl<'a> RouterSlot<'a> {
    fn lookup(routers: &'a [RouterConfig], id: &str) -> Self {
        routers
            .iter()
            .find(|router| router.id() == id)
            .map_or(RouterSlot::Absent, RouterSlot::Present)
    }
}

/// Everything a routing strategy needs to grade one router
pub struct RouterContext<'a> {
    pub id: &'a str,
    pub master: &'a ParsedRouter,
    pub student: &'a ParsedRouter,
    pub expected_neighbors: &'a BTreeSet<Ipv4Addr>,
    pub student_neighbors: &'a BTreeSet<Ipv4Addr>,
    /// Prefix both sides were normalized onto
    pub prefix: &'a str,
    pub rubric: &'a Rubric,
}

/// Addressing options for one grading run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeOptions {
    /// Student's cohort prefix, e.g. `10.0`
    pub address_prefix: String,
    /// Overrides `address_prefix` as the normalization target
    pub master_prefix: Option<String>,
    /// Master archive name, consulted for the assignment type
    pub master_name: Option<String>,
}

impl GradeOptions {
    pub fn new(address_prefix: impl Into<String>) -> Self {
        Self {
            address_prefix: address_prefix.into(),
            ..Default::default()
        }
    }

    /// Prefix every config and neighbor table is rewritten onto
    pub fn normalization_prefix(&self) -> &str {
        self.master_prefix.as_deref().unwrap_or(&self.address_prefix)
    }
}

/// Submissions and options for [`grade`]
#[derive(Debug, Clone)]
pub struct GradeRequest {
    pub master: ConfigInput,
    pub student: ConfigInput,
    /// Defaults to `master`
    pub master_neighbors: Option<ConfigInput>,
    /// Defaults to `student`
    pub student_neighbors: Option<ConfigInput>,
    pub address_prefix: String,
    pub master_prefix: Option<String>,
    /// Defaults to the master input's name
    pub master_name: Option<String>,
}

impl GradeRequest {
    pub fn new(master: ConfigInput, student: ConfigInput, address_prefix: impl Into<String>) -> Self {
        Self {
            master,
            student,
            master_neighbors: None,
            student_neighbors: None,
            address_prefix: address_prefix.into(),
            master_prefix: None,
            master_name: None,
        }
    }

    pub fn with_master_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.master_prefix = Some(prefix.into());
        self
    }

    pub fn with_neighbors(mut self, master: Option<ConfigInput>, student: Option<ConfigInput>) -> Self {
        self.master_neighbors = master;
        self.student_neighbors = student;
        self
    }

    pub fn with_master_name(mut self, name: impl Into<String>) -> Self {
        self.master_name = Some(name.into());
        self
    }
}

/// Load all four submissions and grade them
#[instrument(skip_all, fields(master = %request.master.name(), student = %request.student.name()))]
pub fn grade(request: &GradeRequest, rubric: &Rubric) -> Result<GradingSummary> {
    validate_prefix(&request.address_prefix)?;
    if let Some(prefix) = &request.master_prefix {
        validate_prefix(prefix)?;
    }

    let start = Instant::now();
    let master = request.master.load()?;
    let student = request.student.load()?;
    let master_neighbors = request
        .master_neighbors
        .as_ref()
        .unwrap_or(&request.master)
        .load()?;
    let student_neighbors = request
        .student_neighbors
        .as_ref()
        .unwrap_or(&request.student)
        .load()?;
    crate::trace_time!(
        start,
        "load_submissions",
        master = master.len(),
        student = student.len()
    );

    let options = GradeOptions {
        address_prefix: request.address_prefix.clone(),
        master_prefix: request.master_prefix.clone(),
        master_name: Some(
            request
                .master_name
                .clone()
                .unwrap_or_else(|| request.master.name()),
        ),
    };

    Ok(grade_sets(
        &master,
        &student,
        &master_neighbors,
        &student_neighbors,
        &options,
        rubric,
    ))
}

/// Grade already loaded config sets.
///
/// The master neighbor set is accepted for symmetry with the student side;
/// expected adjacencies are derived from the master topology instead.
pub fn grade_sets(
    master: &ConfigSet,
    student: &ConfigSet,
    _master_neighbors: &ConfigSet,
    student_neighbors: &ConfigSet,
    options: &GradeOptions,
    rubric: &Rubric,
) -> GradingSummary {
    let start = Instant::now();
    let prefix = options.normalization_prefix();

    let master_routers = parse_set(master, prefix);
    let student_routers = parse_set(student, prefix);
    crate::trace_time!(start, "parse_configs", routers = master_routers.len());

    let assignment_type = detect_assignment_type(&master_routers, options.master_name.as_deref());
    debug!(%assignment_type, "detected assignment type");

    let master_edges = build_edges(&subnet_map(&master_routers));
    let expected = expected_neighbors(&master_routers, &master_edges);
    let none = BTreeSet::new();
    let empty = ParsedRouter::default();

    let mut per_router = Vec::with_capacity(master_routers.len());
    let mut total = 0.0;

    for master_router in &master_routers {
        let id = master_router.id();
        let slot = RouterSlot::lookup(&student_routers, id);
        let seen = student_neighbors
            .get(id)
            .map(|text| neighbor_table(text, prefix))
            .unwrap_or_default();

        let ctx = RouterContext {
            id,
            master: master_router.parsed(),
            student: match slot {
                RouterSlot::Present(router) => router.parsed(),
                RouterSlot::Absent => &empty,
            },
            expected_neighbors: expected.get(id).unwrap_or(&none),
            student_neighbors: &seen,
            prefix,
            rubric,
        };

        let (score, grade) = grade_router(&ctx, slot, assignment_type);
        debug!(router = id, score = grade.score, "graded router");
        total += score;
        per_router.push((id.to_string(), grade));
    }

    let routing_score = if per_router.is_empty() {
        0.0
    } else {
        round_tenth(total / per_router.len() as f64)
    };

    let student_edges = build_edges(&subnet_map(&student_routers));
    let outcome = compare_topology(&master_edges, &student_edges, &rubric.topology);
    let final_score = round_tenth(routing_score - outcome.deduction).max(0.0);
    crate::trace_time!(start, "grade_sets", final_score = final_score);

    GradingSummary {
        assignment_type,
        num_routers: master_routers.len(),
        per_router,
        routing_score,
        topology_feedback: outcome.feedback,
        topology_deduction: outcome.deduction,
        master_edges,
        student_edges,
        final_score,
    }
}

/// Grade one router, returning the unrounded score alongside the result
fn grade_router(
    ctx: &RouterContext<'_>,
    slot: RouterSlot<'_>,
    assignment_type: AssignmentType,
) -> (f64, RouterGrade) {
    let mut sheet = ScoreSheet::new();

    if let RouterSlot::Absent = slot {
        sheet.note(
            Section::Router,
            format!("⚠️ {} not found in submission", ctx.id),
        );
    }

    checks::check_masks(ctx.student, ctx.rubric, &mut sheet);
    checks::check_address_format(ctx.student, ctx.prefix, ctx.rubric, &mut sheet);

    match assignment_type {
        AssignmentType::Static => static_routes::grade_static(ctx, &mut sheet),
        AssignmentType::Ospf => ospf::grade_ospf(ctx, &mut sheet),
    }

    checks::check_hostname(ctx.student, ctx.rubric, &mut sheet);

    (sheet.score(), sheet.finish())
}

fn parse_set(set: &ConfigSet, prefix: &str) -> Vec<RouterConfig> {
    set.iter()
        .map(|(id, text)| RouterConfig::new(id, text, prefix))
        .collect()
}

fn neighbor_table(text: &str, prefix: &str) -> BTreeSet<Ipv4Addr> {
    parse_neighbor_table(&normalize_addresses(&sanitize(text), prefix))
}
