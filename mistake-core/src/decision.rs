//! Resolving the final deduction from the candidate amounts.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::deduction::DeductionCandidates;

/// Named rule that picks one candidate as the final deduction.
///
/// Parsing is lenient: every label seen in earlier dashboard builds is
/// accepted, and anything unrecognized falls back to [`DecisionPolicy::Minimum`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionPolicy {
    /// Smallest of the four candidates.
    #[default]
    Minimum,
    /// Largest of the four candidates.
    Maximum,
    /// Upper-middle candidate after an ascending sort.
    Median,
    /// The average-score candidate.
    Average,
    /// The weighted-score candidate.
    Weighted,
    /// The mistake-count candidate.
    Count,
    /// The mistake-amount candidate.
    Amount,
}

impl DecisionPolicy {
    pub const ALL: [Self; 7] = [
        Self::Minimum,
        Self::Maximum,
        Self::Median,
        Self::Average,
        Self::Weighted,
        Self::Count,
        Self::Amount,
    ];

    /// Stable identifier used in storage and exports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Median => "median",
            Self::Average => "average",
            Self::Weighted => "weighted",
            Self::Count => "count",
            Self::Amount => "amount",
        }
    }

    /// Translation key for the policy label.
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Minimum => "policy.minimum",
            Self::Maximum => "policy.maximum",
            Self::Median => "policy.median",
            Self::Average => "policy.average",
            Self::Weighted => "policy.weighted",
            Self::Count => "policy.count",
            Self::Amount => "policy.amount",
        }
    }

    /// Parse a label, returning `None` when it names no known policy.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "minimum" | "min" => Some(Self::Minimum),
            "maximum" | "max" => Some(Self::Maximum),
            "median" | "medium" => Some(Self::Median),
            "average" | "avg" => Some(Self::Average),
            "weighted" => Some(Self::Weighted),
            "count" | "txn" => Some(Self::Count),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }

    /// Parse a label, substituting `fallback` for anything unrecognized.
    #[must_use]
    pub fn parse_or(label: &str, fallback: Self) -> Self {
        Self::parse(label).unwrap_or(fallback)
    }

    /// Pick the final amount from `candidates`.
    #[must_use]
    pub fn resolve(self, candidates: &DeductionCandidates) -> u64 {
        let values = candidates.as_array();
        match self {
            Self::Minimum => values.into_iter().min().unwrap_or_default(),
            Self::Maximum => values.into_iter().max().unwrap_or_default(),
            Self::Median => {
                let mut sorted = values;
                sorted.sort_unstable();
                sorted[sorted.len() / 2]
            }
            Self::Average => candidates.average,
            Self::Weighted => candidates.weighted,
            Self::Count => candidates.by_count,
            Self::Amount => candidates.by_amount,
        }
    }
}

impl From<String> for DecisionPolicy {
    fn from(label: String) -> Self {
        Self::parse_or(&label, Self::default())
    }
}

impl From<DecisionPolicy> for String {
    fn from(policy: DecisionPolicy) -> Self {
        policy.key().to_string()
    }
}

impl fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolve `policy_label` against `candidates`, treating unknown labels as minimum.
#[must_use]
pub fn resolve_final_amount(candidates: &DeductionCandidates, policy_label: &str) -> u64 {
    DecisionPolicy::parse_or(policy_label, DecisionPolicy::Minimum).resolve(candidates)
}
