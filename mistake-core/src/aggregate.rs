//! Combining the two base scores into average and weighted scores.
use serde::{Deserialize, Serialize};

use crate::constants::{WEIGHT_AMOUNT_LED, WEIGHT_COUNT_LED, WEIGHT_SUM_TOLERANCE};
use crate::numbers::round_score;

/// Relative weight of the count score and the amount score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weighting {
    pub count: f64,
    pub amount: f64,
}

impl Weighting {
    /// 60% count, 40% amount.
    #[must_use]
    pub const fn count_led() -> Self {
        Self {
            count: WEIGHT_COUNT_LED.0,
            amount: WEIGHT_COUNT_LED.1,
        }
    }

    /// 30% count, 70% amount.
    #[must_use]
    pub const fn amount_led() -> Self {
        Self {
            count: WEIGHT_AMOUNT_LED.0,
            amount: WEIGHT_AMOUNT_LED.1,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.count + self.amount
    }

    /// Weights are finite, non-negative, and add up to one.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.count.is_finite()
            && self.amount.is_finite()
            && self.count >= 0.0
            && self.amount >= 0.0
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Self::count_led()
    }
}

/// Mean of the two base scores, rounded to two decimals.
#[must_use]
pub fn average_score(count_score: f64, amount_score: f64) -> f64 {
    round_score(f64::midpoint(count_score, amount_score))
}

/// Weighted combination of the two base scores, rounded to two decimals.
#[must_use]
pub fn weighted_score(count_score: f64, amount_score: f64, weighting: Weighting) -> f64 {
    round_score(count_score.mul_add(weighting.count, amount_score * weighting.amount))
}
