//! Checks applied to every student router regardless of assignment type

use std::collections::BTreeSet;

use crate::config::Rubric;
use crate::net::mask_to_cidr;
use crate::normalize::follows_convention;
use crate::parse::ParsedRouter;

use super::sheet::{points, ScoreSheet, Section};

/// Hostname every router ships with
const DEFAULT_HOSTNAME: &str = "router";

/// Every interface mask must reduce to the rubric's prefix length
pub fn check_masks(student: &ParsedRouter, rubric: &Rubric, sheet: &mut ScoreSheet) {
    for binding in &student.interfaces {
        if mask_to_cidr(binding.mask) != rubric.expected_mask_prefix {
            sheet.deduct(
                Section::MaskAndFormat,
                rubric.mask_deduction_per_iface,
                format!(
                    "❌ Incorrect mask for {}: −{} pts",
                    binding.address,
                    points(rubric.mask_deduction_per_iface)
                ),
            );
        }
    }
}

/// Interface addresses and next-hops must follow the cohort addressing scheme
pub fn check_address_format(
    student: &ParsedRouter,
    prefix: &str,
    rubric: &Rubric,
    sheet: &mut ScoreSheet,
) {
    let referenced: BTreeSet<&str> = student.address_tokens.iter().map(String::as_str).collect();
    let violations = referenced
        .iter()
        .filter(|address| !follows_convention(address, prefix))
        .count();

    if violations > 0 {
        let penalty = violations as f64 * rubric.format_deduction_per_address;
        sheet.deduct(
            Section::MaskAndFormat,
            penalty,
            format!(
                "⚠️ {} invalid IP format(s): −{} pts",
                violations,
                points(penalty)
            ),
        );
    }
}

/// The router must be renamed from its factory default
pub fn check_hostname(student: &ParsedRouter, rubric: &Rubric, sheet: &mut ScoreSheet) {
    let amount = points(rubric.hostname_deduction);
    match student.hostname.as_deref() {
        None => sheet.deduct(
            Section::Hostname,
            rubric.hostname_deduction,
            format!("❌ Missing hostname: −{} pts", amount),
        ),
        Some(name) if name.eq_ignore_ascii_case(DEFAULT_HOSTNAME) => sheet.deduct(
            Section::Hostname,
            rubric.hostname_deduction,
            format!("❌ Default hostname: −{} pts", amount),
        ),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    fn grade(text: &str, check: impl Fn(&ParsedRouter, &Rubric, &mut ScoreSheet)) -> (f64, Vec<String>) {
        let mut sheet = ScoreSheet::new();
        check(&parse_config(text), &Rubric::default(), &mut sheet);
        let grade = sheet.finish();
        (grade.score, grade.feedback)
    }

    #[test]
    fn test_masks_ok() {
        let (score, feedback) = grade(
            "interface g0\nip address 10.0.0.1 255.255.255.0",
            check_masks,
        );
        assert_eq!(score, 100.0);
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_each_bad_mask_costs() {
        let text = "interface g0\nip address 10.0.0.1 255.255.0.0\ninterface g1\nip address 10.0.1.1 255.255.255.252";
        let (score, feedback) = grade(text, check_masks);
        assert_eq!(score, 90.0);
        assert_eq!(feedback[1], "❌ Incorrect mask for 10.0.0.1: −5 pts");
    }

    #[test]
    fn test_address_format_counts_distinct_violations() {
        let text = "interface g0\nip address 192.168.0.1 255.255.255.0\nip route 10.0.9.0 255.255.255.0 192.168.0.2\nip route 10.0.8.0 255.255.255.0 192.168.0.2";
        let mut sheet = ScoreSheet::new();
        check_address_format(&parse_config(text), "10.0", &Rubric::default(), &mut sheet);
        let grade = sheet.finish();
        assert_eq!(grade.score, 90.0);
        assert_eq!(grade.feedback[1], "⚠️ 2 invalid IP format(s): −10 pts");
    }

    #[test]
    fn test_address_format_accepts_prefix_and_cohort_shape() {
        let text = "interface g0\nip address 10.0.0.1 255.255.255.0\ninterface g1\nip address 212.05.3.1 255.255.255.0";
        let mut sheet = ScoreSheet::new();
        check_address_format(&parse_config(text), "10.0", &Rubric::default(), &mut sheet);
        assert_eq!(sheet.finish().score, 100.0);
    }

    #[test]
    fn test_missing_hostname() {
        let (score, feedback) = grade("interface g0", check_hostname);
        assert_eq!(score, 95.0);
        assert_eq!(feedback, vec!["--- Hostname ---", "❌ Missing hostname: −5 pts"]);
    }

    #[test]
    fn test_default_hostname() {
        let (score, feedback) = grade("hostname Router", check_hostname);
        assert_eq!(score, 95.0);
        assert_eq!(feedback[1], "❌ Default hostname: −5 pts");
    }

    #[test]
    fn test_custom_hostname() {
        let (score, _) = grade("hostname Edge1", check_hostname);
        assert_eq!(score, 100.0);
    }
}
