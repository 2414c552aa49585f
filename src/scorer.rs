//! Pairwise similarity scoring between two reports.
//!
//! The score is an additive sum of boolean gates, capped:
//!
//! | Gate | Test | Default weight |
//! |------|------|----------------|
//! | category | `a.category == b.category` | 40 |
//! | location | exact string equality | 30 |
//! | color | lowercase containment, either direction | 20 |
//! | condition | exact string equality | 10 |
//!
//! There is no partial credit. Every gate is symmetric, so
//! `score(a, b) == score(b, a)` for any pair.
use serde::{Deserialize, Serialize};

use crate::item::ItemRecord;

/// Weight of each scoring gate plus the cap applied to their sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreWeights {
    #[serde(default = "ScoreWeights::default_category")]
    pub category: u8,
    #[serde(default = "ScoreWeights::default_location")]
    pub location: u8,
    #[serde(default = "ScoreWeights::default_color")]
    pub color: u8,
    #[serde(default = "ScoreWeights::default_condition")]
    pub condition: u8,
    /// Upper bound on the final score, enforced regardless of the weights.
    #[serde(default = "ScoreWeights::default_cap")]
    pub cap: u8,
}

impl ScoreWeights {
    pub const fn default_category() -> u8 {
        40
    }

    pub const fn default_location() -> u8 {
        30
    }

    pub const fn default_color() -> u8 {
        20
    }

    pub const fn default_condition() -> u8 {
        10
    }

    pub const fn default_cap() -> u8 {
        100
    }

    /// Sum of all gate weights before capping.
    pub fn total(&self) -> u32 {
        u32::from(self.category)
            + u32::from(self.location)
            + u32::from(self.color)
            + u32::from(self.condition)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: Self::default_category(),
            location: Self::default_location(),
            color: Self::default_color(),
            condition: Self::default_condition(),
            cap: Self::default_cap(),
        }
    }
}

/// Which gates fired for a pair, and the resulting capped score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub category_match: bool,
    pub location_match: bool,
    pub color_match: bool,
    pub condition_match: bool,
    pub score: u8,
}

/// Score a pair with the default weights.
pub fn score(a: &ItemRecord, b: &ItemRecord) -> u8 {
    score_with(a, b, &ScoreWeights::default())
}

/// Score a pair with explicit weights.
pub fn score_with(a: &ItemRecord, b: &ItemRecord, weights: &ScoreWeights) -> u8 {
    explain(a, b, weights).score
}

/// Evaluate every gate for a pair and report which ones matched.
pub fn explain(a: &ItemRecord, b: &ItemRecord, weights: &ScoreWeights) -> ScoreBreakdown {
    let category_match = a.category == b.category;
    let location_match = a.location == b.location;
    let color_match = colors_overlap(&a.color, &b.color);
    let condition_match = a.condition == b.condition;

    let mut sum = 0u32;
    if category_match {
        sum += u32::from(weights.category);
    }
    if location_match {
        sum += u32::from(weights.location);
    }
    if color_match {
        sum += u32::from(weights.color);
    }
    if condition_match {
        sum += u32::from(weights.condition);
    }

    // min() against a u8 cap keeps the cast lossless.
    let score = sum.min(u32::from(weights.cap)) as u8;

    ScoreBreakdown {
        category_match,
        location_match,
        color_match,
        condition_match,
        score,
    }
}

/// Case-insensitive substring containment in either direction.
///
/// An empty color is contained in every other color.
fn colors_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}
