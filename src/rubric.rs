//! Rubric Registry
//!
//! Static mapping from rubric kind to scoring configuration:
//! - Minimum and ideal response lengths
//! - Weighted indicator keyword categories
//! - Casual-language penalty list
//! - Opening/closing conventions for the structural bonus
//!
//! Dispatch is exhaustive over the closed [`RubricKind`] enum. Challenge
//! identity never enters scoring; challenges reference a kind and the
//! kind resolves to one table entry here.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Closed set of rubric kinds, one per challenge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RubricKind {
    /// Rewrite a sloppy message as professional correspondence
    CorrespondenceRewrite,
    /// Introduce yourself for a presentation or pitch
    PresentationIntro,
    /// Respond to a negotiation counterpart
    NegotiationResponse,
}

/// One indicator keyword category
///
/// Awards `points` once if any keyword is contained in the lowercased
/// response. Presence is categorical, not per-occurrence.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub points: u32,
}

/// Scoring configuration for one rubric kind
#[derive(Debug, Clone, Copy)]
pub struct RubricConfig {
    /// Responses shorter than this (trimmed, in chars) score 0 outright
    pub min_length: usize,
    /// Length at which the length component reaches its full weight
    pub ideal_length: usize,
    /// Maximum points from the length component
    pub length_weight: u32,
    /// Indicator keyword categories, each a one-shot bonus
    pub indicators: &'static [IndicatorCategory],
    /// Casual-language markers; each distinct hit subtracts `casual_penalty`
    pub casual_keywords: &'static [&'static str],
    /// Points subtracted per distinct casual keyword found
    pub casual_penalty: u32,
    /// Opening conventions (greeting phrases)
    pub openings: &'static [&'static str],
    /// Closing conventions (sign-off phrases)
    pub closings: &'static [&'static str],
    /// Bonus when both an opening and a closing are present
    pub structure_bonus: u32,
}

/// Casual shorthand penalized by every rubric.
///
/// Matching is substring containment, so a marker embedded in a longer
/// word still counts. That matches the original heuristic and is kept
/// as-is, including its double-count quirks.
const CASUAL_KEYWORDS: &[&str] = &[
    "lol", "omg", "btw", "thx", "asap", "gonna", "wanna", "kinda", "sorta", "dude", "yeah", "nah",
    "hey",
];

static CORRESPONDENCE_REWRITE: RubricConfig = RubricConfig {
    min_length: 30,
    ideal_length: 80,
    length_weight: 30,
    indicators: &[
        IndicatorCategory {
            name: "professional",
            keywords: &[
                "apologize",
                "apologies",
                "regret",
                "appreciate your patience",
                "thank you for your patience",
                "understanding",
            ],
            points: 20,
        },
        IndicatorCategory {
            name: "commitment",
            keywords: &["i will", "we will", "going to", "committed to", "by "],
            points: 15,
        },
    ],
    casual_keywords: CASUAL_KEYWORDS,
    casual_penalty: 10,
    openings: &[
        "dear",
        "hello",
        "hi ",
        "good morning",
        "good afternoon",
        "greetings",
    ],
    closings: &[
        "best regards",
        "kind regards",
        "regards",
        "sincerely",
        "best,",
        "thank you",
    ],
    structure_bonus: 20,
};

static PRESENTATION_INTRO: RubricConfig = RubricConfig {
    min_length: 40,
    ideal_length: 120,
    length_weight: 25,
    indicators: &[
        IndicatorCategory {
            name: "professional",
            keywords: &[
                "experience",
                "background",
                "expertise",
                "specialize",
                "skill",
            ],
            points: 25,
        },
        IndicatorCategory {
            name: "engagement",
            keywords: &[
                "excited",
                "passionate",
                "thrilled",
                "looking forward",
                "delighted",
            ],
            points: 20,
        },
    ],
    casual_keywords: CASUAL_KEYWORDS,
    casual_penalty: 10,
    openings: &[
        "hi ",
        "hello",
        "good morning",
        "good afternoon",
        "greetings",
        "my name is",
        "i'm ",
        "i am ",
    ],
    closings: &["thank you", "looking forward", "questions", "glad to"],
    structure_bonus: 15,
};

static NEGOTIATION_RESPONSE: RubricConfig = RubricConfig {
    min_length: 40,
    ideal_length: 100,
    length_weight: 25,
    indicators: &[
        IndicatorCategory {
            name: "diplomatic",
            keywords: &[
                "understand",
                "appreciate",
                "perspective",
                "however",
                "alternative",
                "propose",
                "compromise",
            ],
            points: 25,
        },
        IndicatorCategory {
            name: "professional",
            keywords: &["value", "budget", "timeline", "scope", "agreement", "terms"],
            points: 20,
        },
    ],
    casual_keywords: CASUAL_KEYWORDS,
    casual_penalty: 10,
    openings: &["thank you", "i appreciate", "hi ", "hello", "dear"],
    closings: &["regards", "sincerely", "look forward", "best"],
    structure_bonus: 15,
};

/// Resolve the scoring configuration for a rubric kind
pub fn rubric_for(kind: RubricKind) -> &'static RubricConfig {
    match kind {
        RubricKind::CorrespondenceRewrite => &CORRESPONDENCE_REWRITE,
        RubricKind::PresentationIntro => &PRESENTATION_INTRO,
        RubricKind::NegotiationResponse => &NEGOTIATION_RESPONSE,
    }
}
