//! Step functions mapping raw mistake inputs onto the discrete score scale.
use serde::{Deserialize, Serialize};

use crate::constants::{
    AMOUNT_BAND_HIGH_MAX, AMOUNT_BAND_LOW_MAX, AMOUNT_BAND_MEDIUM_MAX, AMOUNT_BAND_MIN,
    COUNT_BAND_HIGH_MAX, COUNT_BAND_LOW_MAX, COUNT_BAND_MEDIUM_MAX, COUNT_BAND_MIN, SCORE_FULL,
    SCORE_HIGH, SCORE_LOW, SCORE_MEDIUM, SCORE_NONE,
};

/// Every value a base score can take, in ascending order.
pub const SCORE_SCALE: [f64; 5] = [SCORE_NONE, SCORE_LOW, SCORE_MEDIUM, SCORE_HIGH, SCORE_FULL];

/// Thresholds for one step function.
///
/// Values below `min` score 0.0; each `*_max` is the inclusive upper bound of
/// its band, and anything above `high_max` scores 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBands {
    pub min: u64,
    pub low_max: u64,
    pub medium_max: u64,
    pub high_max: u64,
}

impl ScoreBands {
    /// Bands for the number of procedural mistakes.
    #[must_use]
    pub const fn mistake_count() -> Self {
        Self {
            min: COUNT_BAND_MIN,
            low_max: COUNT_BAND_LOW_MAX,
            medium_max: COUNT_BAND_MEDIUM_MAX,
            high_max: COUNT_BAND_HIGH_MAX,
        }
    }

    /// Bands for the monetary magnitude of mistakes.
    #[must_use]
    pub const fn mistake_amount() -> Self {
        Self {
            min: AMOUNT_BAND_MIN,
            low_max: AMOUNT_BAND_LOW_MAX,
            medium_max: AMOUNT_BAND_MEDIUM_MAX,
            high_max: AMOUNT_BAND_HIGH_MAX,
        }
    }

    /// Score a raw value against these bands.
    #[must_use]
    pub const fn score(&self, value: u64) -> f64 {
        if value < self.min {
            SCORE_NONE
        } else if value <= self.low_max {
            SCORE_LOW
        } else if value <= self.medium_max {
            SCORE_MEDIUM
        } else if value <= self.high_max {
            SCORE_HIGH
        } else {
            SCORE_FULL
        }
    }

    /// Whether every threshold is strictly above the one before it.
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.min > 0
            && self.min <= self.low_max
            && self.low_max < self.medium_max
            && self.medium_max < self.high_max
    }
}

/// Score a mistake count with the standard bands.
#[must_use]
pub const fn score_from_mistake_count(count: u64) -> f64 {
    ScoreBands::mistake_count().score(count)
}

/// Score a mistake amount with the standard bands.
#[must_use]
pub const fn score_from_mistake_amount(amount: u64) -> f64 {
    ScoreBands::mistake_amount().score(amount)
}

/// Display severity for any score in `[0, 1]`, averages included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTone {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreTone {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= SCORE_NONE {
            Self::Critical
        } else if score <= SCORE_LOW {
            Self::Poor
        } else if score <= SCORE_MEDIUM {
            Self::Fair
        } else if score <= SCORE_HIGH {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Critical => "score-critical",
            Self::Poor => "score-poor",
            Self::Fair => "score-fair",
            Self::Good => "score-good",
            Self::Excellent => "score-excellent",
        }
    }
}
