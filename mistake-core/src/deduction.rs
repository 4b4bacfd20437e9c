//! Converting scores into monetary deduction candidates.
use serde::{Deserialize, Serialize};

use crate::constants::{DEDUCTION_CAP_REDUCED, DEDUCTION_CAP_STANDARD};
use crate::numbers::{round_f64_to_u64, u64_to_f64};

/// How a score turns into an amount of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeductionStrategy {
    /// `round(score * cap)` against a deployment-wide ceiling.
    #[serde(rename_all = "camelCase")]
    FixedMultiplier { cap_amount: u64 },
    /// `round(mistake_amount * score)`, tied to the record's own magnitude.
    Proportional,
}

impl DeductionStrategy {
    #[must_use]
    pub const fn standard_cap() -> Self {
        Self::FixedMultiplier {
            cap_amount: DEDUCTION_CAP_STANDARD,
        }
    }

    #[must_use]
    pub const fn reduced_cap() -> Self {
        Self::FixedMultiplier {
            cap_amount: DEDUCTION_CAP_REDUCED,
        }
    }

    /// Amount deducted for `score` on a record whose mistakes total `mistake_amount`.
    #[must_use]
    pub fn deduction(self, score: f64, mistake_amount: u64) -> u64 {
        let base = match self {
            Self::FixedMultiplier { cap_amount } => cap_amount,
            Self::Proportional => mistake_amount,
        };
        round_f64_to_u64(score * u64_to_f64(base))
    }
}

impl Default for DeductionStrategy {
    fn default() -> Self {
        Self::standard_cap()
    }
}

/// The four amounts a decision policy chooses between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionCandidates {
    pub by_count: u64,
    pub by_amount: u64,
    pub average: u64,
    pub weighted: u64,
}

impl DeductionCandidates {
    /// Build all four candidates from the record's scores.
    #[must_use]
    pub fn from_scores(
        strategy: DeductionStrategy,
        mistake_amount: u64,
        scores: [f64; 4],
    ) -> Self {
        let [count, amount, average, weighted] = scores;
        Self {
            by_count: strategy.deduction(count, mistake_amount),
            by_amount: strategy.deduction(amount, mistake_amount),
            average: strategy.deduction(average, mistake_amount),
            weighted: strategy.deduction(weighted, mistake_amount),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> [u64; 4] {
        [self.by_count, self.by_amount, self.average, self.weighted]
    }
}
