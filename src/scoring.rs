//! Rubric Scorer
//!
//! Pure deterministic scoring: `(text, rubric kind) -> ScoreBreakdown`.
//! No randomness and no external state; identical input always yields
//! an identical breakdown.
//!
//! Components:
//! - Length adequacy, scaled linearly up to the rubric's ideal length
//! - Categorical indicator bonuses (presence, not per-occurrence)
//! - Penalty per distinct casual keyword, floored at 0
//! - Structural bonus when both an opening and a closing appear

use serde::{Deserialize, Serialize};

use crate::rubric::{rubric_for, RubricKind};
use crate::PASS_THRESHOLD;

/// Feedback shown when a response is below the rubric minimum length
pub const FEEDBACK_TOO_SHORT: &str = "Response is too short. Add more detail before submitting.";

/// Feedback for a failing score at or above the minimum length
pub const FEEDBACK_FAIL: &str =
    "Not quite there yet. Add professional language and structure, and avoid casual shorthand.";

/// Feedback for a passing score
pub const FEEDBACK_PASS: &str = "Solid response. Clear professional tone with room to polish.";

/// Feedback for a high passing score
pub const FEEDBACK_EXCELLENT: &str = "Excellent response. Professional, structured, and well paced.";

/// Score above which the excellent feedback tier applies
const EXCELLENT_THRESHOLD: u32 = 85;

/// One user attempt at a challenge. Not persisted beyond the pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Raw free-text answer
    pub text: String,
    /// Challenge being attempted
    pub challenge_id: String,
}

/// Deterministic scoring result for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points from length adequacy
    pub length_score: u32,
    /// Points from indicator keyword categories
    pub indicator_score: u32,
    /// Points subtracted for casual language (before flooring)
    pub casual_penalty: u32,
    /// Points from the opening/closing structural bonus
    pub structure_bonus: u32,
    /// Final score, always within [0, 100]
    pub total: u32,
    /// Whether total reached the fixed pass threshold
    pub passed: bool,
    /// Feedback tier text
    pub feedback: String,
}

impl ScoreBreakdown {
    fn too_short() -> Self {
        Self {
            length_score: 0,
            indicator_score: 0,
            casual_penalty: 0,
            structure_bonus: 0,
            total: 0,
            passed: false,
            feedback: FEEDBACK_TOO_SHORT.to_string(),
        }
    }
}

/// Score a free-text response against a rubric kind
///
/// Trims the input and short-circuits to a zero score below the rubric
/// minimum length. Otherwise sums the weighted components, floors at 0
/// and caps at 100. Passing is `total >= PASS_THRESHOLD`, identical for
/// every rubric kind.
pub fn score(text: &str, kind: RubricKind) -> ScoreBreakdown {
    let rubric = rubric_for(kind);
    let trimmed = text.trim();
    let len = trimmed.chars().count();

    if len < rubric.min_length {
        return ScoreBreakdown::too_short();
    }

    let lower = trimmed.to_lowercase();

    let length_score =
        (len.min(rubric.ideal_length) as u32 * rubric.length_weight) / rubric.ideal_length as u32;

    // Each category is a one-shot bonus: the first contained keyword
    // wins and further occurrences add nothing.
    let indicator_score: u32 = rubric
        .indicators
        .iter()
        .filter(|cat| cat.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|cat| cat.points)
        .sum();

    let casual_hits = rubric
        .casual_keywords
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count() as u32;
    let casual_penalty = casual_hits * rubric.casual_penalty;

    let has_opening = rubric.openings.iter().any(|kw| lower.contains(kw));
    let has_closing = rubric.closings.iter().any(|kw| lower.contains(kw));
    let structure_bonus = if has_opening && has_closing {
        rubric.structure_bonus
    } else {
        0
    };

    let total = (length_score + indicator_score + structure_bonus)
        .saturating_sub(casual_penalty)
        .min(100);
    let passed = total >= PASS_THRESHOLD;

    let feedback = if total >= EXCELLENT_THRESHOLD {
        FEEDBACK_EXCELLENT
    } else if passed {
        FEEDBACK_PASS
    } else {
        FEEDBACK_FAIL
    };

    ScoreBreakdown {
        length_score,
        indicator_score,
        casual_penalty,
        structure_bonus,
        total,
        passed,
        feedback: feedback.to_string(),
    }
}
