//! Maps an ARI readability score onto the buckets a results view shows.

use std::fmt;

/// Display widths of the Needs Revision, Pass and Too Complex segments.
pub const GAUGE_SEGMENT_WIDTHS: [f64; 3] = [131.0, 39.0, 186.0];
pub const PASS_ZONE_MIN_SCORE: f64 = 14.0;
/// Highest score that still meets the required (grade 6) reading level.
pub const REQUIRED_GRADE_MAX_SCORE: f64 = 15.0;
const GAUGE_UPPER_SPAN: f64 = 13.0;

pub const ARI_EXPLAINER_TITLE: &str = "What does ARI score represent?";
pub const ARI_EXPLAINER: &str = "The Automated Readability Index (ARI) assesses the reading level of a piece of text. It is calculated based on the number of characters, words, and sentences.";

pub const MET_REQUIRED_GRADE_BANNER: &str =
    "Your document has been simplified and has met the required grade level.";
pub const MISSED_REQUIRED_GRADE_BANNER: &str =
    "Your document has been simplified and has not met the required grade level.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    NeedsRevision,
    Pass,
    TooComplex,
}

impl Zone {
    pub fn from_score(score: f64) -> Self {
        if score < PASS_ZONE_MIN_SCORE {
            Self::NeedsRevision
        } else if score <= REQUIRED_GRADE_MAX_SCORE {
            Self::Pass
        } else {
            Self::TooComplex
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NeedsRevision => "Needs Revision",
            Self::Pass => "Pass",
            Self::TooComplex => "Too Complex",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caret offset along the three-segment gauge. Scores outside 0..=28 are
/// extrapolated past the track rather than clamped.
pub fn gauge_position(score: f64) -> f64 {
    let [low, pass, high] = GAUGE_SEGMENT_WIDTHS;
    if score < PASS_ZONE_MIN_SCORE {
        (low / PASS_ZONE_MIN_SCORE) * score
    } else if score <= REQUIRED_GRADE_MAX_SCORE {
        low + pass * (score - PASS_ZONE_MIN_SCORE)
    } else {
        low + pass + (high / GAUGE_UPPER_SPAN) * (score - REQUIRED_GRADE_MAX_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GradeLevel {
    Kindergarten,
    /// School grades 2 through 12.
    Grade(u8),
    College,
}

// Inclusive upper score bound for each bucket below College.
const GRADE_STEPS: [(f64, GradeLevel); 12] = [
    (5.0, GradeLevel::Kindergarten),
    (7.0, GradeLevel::Grade(2)),
    (9.0, GradeLevel::Grade(3)),
    (11.0, GradeLevel::Grade(4)),
    (13.0, GradeLevel::Grade(5)),
    (15.0, GradeLevel::Grade(6)),
    (17.0, GradeLevel::Grade(7)),
    (19.0, GradeLevel::Grade(8)),
    (21.0, GradeLevel::Grade(9)),
    (23.0, GradeLevel::Grade(10)),
    (25.0, GradeLevel::Grade(11)),
    (27.0, GradeLevel::Grade(12)),
];

impl GradeLevel {
    pub fn from_score(score: f64) -> Self {
        GRADE_STEPS
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map(|(_, grade)| *grade)
            .unwrap_or(GradeLevel::College)
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kindergarten => f.write_str("Kindergarten"),
            Self::College => f.write_str("College"),
            Self::Grade(n) => {
                let suffix = match n {
                    2 => "nd",
                    3 => "rd",
                    _ => "th",
                };
                write!(f, "{n}{suffix}")
            }
        }
    }
}

pub fn meets_required_grade(score: f64) -> bool {
    score <= REQUIRED_GRADE_MAX_SCORE
}

pub fn banner(score: f64) -> &'static str {
    if meets_required_grade(score) {
        MET_REQUIRED_GRADE_BANNER
    } else {
        MISSED_REQUIRED_GRADE_BANNER
    }
}

/// Everything a results view derives from one score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityReport {
    pub score: f64,
    pub grade: GradeLevel,
    pub zone: Zone,
    pub gauge_position: f64,
}

impl ReadabilityReport {
    /// A score that is not a number is read as zero.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score };
        Self {
            score,
            grade: GradeLevel::from_score(score),
            zone: Zone::from_score(score),
            gauge_position: gauge_position(score),
        }
    }

    pub fn score_display(&self) -> String {
        format!("{:.2}", self.score)
    }

    pub fn meets_required_grade(&self) -> bool {
        meets_required_grade(self.score)
    }

    pub fn banner(&self) -> &'static str {
        banner(self.score)
    }
}

#[cfg(test)]
#[path = "tests/readability_tests.rs"]
mod tests;
