//! Static-route scoring
//!
//! Each master route carries an equal share of 100 points. A student loses
//! part or all of a route's share when the route is wrong or missing, and a
//! full share for every route pointing at a next-hop that is not a directly
//! connected neighbor. The sum of those losses is capped; duplicated
//! destinations are charged separately under their own cap.

use std::collections::BTreeMap;

use super::sheet::{points, ScoreSheet, Section};
use super::RouterContext;

/// Weight of each master route
fn route_share(master_routes: usize) -> f64 {
    100.0 / master_routes.max(1) as f64
}

pub fn grade_static(ctx: &RouterContext<'_>, sheet: &mut ScoreSheet) {
    let rubric = &ctx.rubric.static_routing;
    let master_routes = &ctx.master.static_routes;
    let student_routes = &ctx.student.static_routes;
    let student_by_key = ctx.student.routes_by_key();

    let share = route_share(master_routes.len());
    let mut lost = 0.0;

    for route in student_routes {
        if !ctx.expected_neighbors.contains(&route.next_hop) {
            lost += share;
            sheet.note(
                Section::StaticRouting,
                format!(
                    "❌ Multi-hop next-hop {} not directly connected: −{} pts",
                    route.next_hop,
                    points(share)
                ),
            );
        }
    }

    for route in master_routes {
        let key = route.key();
        let penalty = match student_by_key.get(&key) {
            Some(next_hops) if next_hops.contains(&route.next_hop) => continue,
            Some(_) => {
                let penalty = share * (1.0 - rubric.next_hop_credit);
                sheet.note(
                    Section::StaticRouting,
                    format!("❌ {} wrong next-hop: −{} pts", key, points(penalty)),
                );
                penalty
            }
            None if student_routes
                .iter()
                .any(|r| r.destination == route.destination) =>
            {
                let penalty = share * (1.0 - rubric.mask_credit);
                sheet.note(
                    Section::StaticRouting,
                    format!(
                        "❌ {} wrong mask: −{} pts",
                        route.destination,
                        points(penalty)
                    ),
                );
                penalty
            }
            None => {
                sheet.note(
                    Section::StaticRouting,
                    format!("❌ Missing {}: −{} pts", key, points(share)),
                );
                share
            }
        };
        lost += penalty;
    }

    if lost > rubric.missing_cap {
        sheet.note(
            Section::StaticRouting,
            format!(
                "ℹ️ Routing deductions capped at {} pts",
                points(rubric.missing_cap)
            ),
        );
        lost = rubric.missing_cap;
    }
    sheet.penalize(lost);

    let duplicates = duplicate_count(ctx);
    if duplicates > 0 {
        let penalty = (duplicates as f64 * rubric.duplicate_deduction).min(rubric.duplicate_cap);
        sheet.deduct(
            Section::StaticRouting,
            penalty,
            format!("❌ Duplicate static destinations: −{} pts", points(penalty)),
        );
    }

    if !sheet.has_notes(Section::StaticRouting) {
        sheet.note(
            Section::StaticRouting,
            "✅ All required static routes configured!",
        );
    }
}

/// Extra entries beyond the first for every destination + prefix
fn duplicate_count(ctx: &RouterContext<'_>) -> usize {
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for route in &ctx.student.static_routes {
        *counts.entry(route.key()).or_default() += 1;
    }
    counts.values().map(|count| count - 1).sum()
}
