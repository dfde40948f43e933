//! Per-router score accumulation and feedback grouping

use std::collections::BTreeMap;

use crate::summary::RouterGrade;

/// Starting score of every router
pub const FULL_SCORE: f64 = 100.0;

/// Feedback sections, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Router,
    StaticRouting,
    OspfRouting,
    MaskAndFormat,
    Hostname,
}

impl Section {
    fn header(self) -> &'static str {
        match self {
            Section::Router => "--- Router ---",
            Section::StaticRouting => "--- Static Routing ---",
            Section::OspfRouting => "--- OSPF Routing ---",
            Section::MaskAndFormat => "--- Mask & Format ---",
            Section::Hostname => "--- Hostname ---",
        }
    }
}

/// Running score and feedback for one router
#[derive(Debug, Clone)]
pub struct ScoreSheet {
    score: f64,
    notes: BTreeMap<Section, Vec<String>>,
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self {
            score: FULL_SCORE,
            notes: BTreeMap::new(),
        }
    }

    /// Record feedback without touching the score
    pub fn note(&mut self, section: Section, message: impl Into<String>) {
        self.notes.entry(section).or_default().push(message.into());
    }

    /// Subtract points without adding feedback
    pub fn penalize(&mut self, points: f64) {
        self.score -= points;
    }

    /// Subtract points and record why
    pub fn deduct(&mut self, section: Section, points: f64, message: impl Into<String>) {
        self.penalize(points);
        self.note(section, message);
    }

    pub fn has_notes(&self, section: Section) -> bool {
        self.notes.get(&section).is_some_and(|notes| !notes.is_empty())
    }

    /// Unrounded score so far
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Round the score and flatten feedback under section headers
    pub fn finish(self) -> RouterGrade {
        let mut feedback = Vec::new();
        for (section, notes) in self.notes {
            if notes.is_empty() {
                continue;
            }
            feedback.push(section.header().to_string());
            feedback.extend(notes);
        }
        RouterGrade {
            score: round_tenth(self.score),
            feedback,
        }
    }
}

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render a point amount for feedback: `5`, `12.5`, `33.3`
pub fn points(value: f64) -> String {
    let rounded = round_tenth(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet_is_full_score() {
        let grade = ScoreSheet::new().finish();
        assert_eq!(grade.score, 100.0);
        assert!(grade.feedback.is_empty());
    }

    #[test]
    fn test_sections_render_in_order_with_headers() {
        let mut sheet = ScoreSheet::new();
        sheet.deduct(Section::Hostname, 5.0, "missing hostname");
        sheet.note(Section::StaticRouting, "all good");
        sheet.deduct(Section::MaskAndFormat, 5.0, "bad mask");
        let grade = sheet.finish();
        assert_eq!(grade.score, 90.0);
        assert_eq!(
            grade.feedback,
            vec![
                "--- Static Routing ---",
                "all good",
                "--- Mask & Format ---",
                "bad mask",
                "--- Hostname ---",
                "missing hostname",
            ]
        );
    }

    #[test]
    fn test_score_may_go_negative() {
        let mut sheet = ScoreSheet::new();
        sheet.penalize(130.0);
        assert_eq!(sheet.finish().score, -30.0);
    }

    #[test]
    fn test_score_rounded_to_tenth() {
        let mut sheet = ScoreSheet::new();
        sheet.penalize(100.0 / 3.0);
        assert_eq!(sheet.finish().score, 66.7);
    }

    #[test]
    fn test_points_formatting() {
        assert_eq!(points(5.0), "5");
        assert_eq!(points(12.5), "12.5");
        assert_eq!(points(100.0 / 3.0), "33.3");
    }
}
