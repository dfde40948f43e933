//! OSPF scoring
//!
//! Advertised networks are compared as sets: each missing network costs a
//! fixed amount, each extra one a smaller amount, both capped. Neighbor
//! adjacencies are reported but not scored.

use std::collections::BTreeSet;
use std::fmt::Display;

use super::sheet::{points, ScoreSheet, Section};
use super::RouterContext;

fn join<T: Display>(items: &BTreeSet<T>) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn grade_ospf(ctx: &RouterContext<'_>, sheet: &mut ScoreSheet) {
    let rubric = &ctx.rubric.ospf;
    let master_nets = &ctx.master.ospf_networks;
    let student_nets = &ctx.student.ospf_networks;

    let missing: BTreeSet<_> = master_nets.difference(student_nets).copied().collect();
    if !missing.is_empty() {
        let penalty = (missing.len() as f64 * rubric.missing_per_network).min(rubric.missing_cap);
        sheet.deduct(
            Section::OspfRouting,
            penalty,
            format!(
                "❌ Missing OSPF net(s): {} −{} pts",
                join(&missing),
                points(penalty)
            ),
        );
    }

    let extra: BTreeSet<_> = student_nets.difference(master_nets).copied().collect();
    if !extra.is_empty() {
        let penalty = (extra.len() as f64 * rubric.extra_per_network).min(rubric.extra_cap);
        sheet.deduct(
            Section::OspfRouting,
            penalty,
            format!(
                "⚠️ Extra OSPF net(s): {} −{} pts",
                join(&extra),
                points(penalty)
            ),
        );
    }

    if missing.is_empty() && extra.is_empty() {
        sheet.note(Section::OspfRouting, "✅ All OSPF networks present!");
    }

    let missing_neighbors: BTreeSet<_> = ctx
        .expected_neighbors
        .difference(ctx.student_neighbors)
        .copied()
        .collect();
    if !missing_neighbors.is_empty() {
        sheet.note(
            Section::OspfRouting,
            format!("⚠️ Missing OSPF neighbor(s): {}", join(&missing_neighbors)),
        );
    }

    let unexpected_neighbors: BTreeSet<_> = ctx
        .student_neighbors
        .difference(ctx.expected_neighbors)
        .copied()
        .collect();
    if !unexpected_neighbors.is_empty() {
        sheet.note(
            Section::OspfRouting,
            format!(
                "⚠️ Unexpected OSPF neighbor(s): {}",
                join(&unexpected_neighbors)
            ),
        );
    }

    if ctx.student.has_static_routes() {
        sheet.deduct(
            Section::OspfRouting,
            rubric.static_route_deduction,
            format!(
                "❌ Static routes in OSPF assignment: −{} pts",
                points(rubric.static_route_deduction)
            ),
        );
    }
}
