//! Staff records and the fields a user may edit.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregate::{average_score, weighted_score};
use crate::config::ScoringConfig;
use crate::constants::UNNAMED_STAFF_LABEL;
use crate::currency::parse_currency;
use crate::decision::DecisionPolicy;
use crate::deduction::DeductionCandidates;
use crate::numbers::coerce_non_negative;

/// One evaluated staff member.
///
/// Only `name`, `mistake_count`, `mistake_amount`, and `decision_policy` are
/// inputs; everything else is rewritten by [`StaffRecord::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "mistakeTxn", deserialize_with = "lenient_input")]
    pub mistake_count: u64,
    #[serde(default, deserialize_with = "lenient_input")]
    pub mistake_amount: u64,
    #[serde(default, alias = "txnScore")]
    pub count_score: f64,
    #[serde(default)]
    pub amount_score: f64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub weighted_score: f64,
    #[serde(default)]
    pub deductions: DeductionCandidates,
    #[serde(default, alias = "decision")]
    pub decision_policy: DecisionPolicy,
    #[serde(default, alias = "deduction", deserialize_with = "lenient_input")]
    pub final_amount: u64,
}

/// Earlier builds stored averaged scores as fixed-point strings ("0.65").
fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) => value,
        Raw::Text(text) => text.trim().parse().unwrap_or(0.0),
    })
}

/// Stored inputs go through the same coercion as typed ones, so a negative or
/// garbled legacy value reads as 0 instead of rejecting the whole snapshot.
fn lenient_input<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Unsigned(value)) => value,
        Some(Raw::Signed(value)) => u64::try_from(value).unwrap_or(0),
        Some(Raw::Float(value)) => coerce_non_negative(&value.to_string()),
        Some(Raw::Text(text)) => coerce_non_negative(&text),
        Some(Raw::Other(_)) | None => 0,
    })
}

impl StaffRecord {
    /// A fresh record with zero inputs, scored under `config`.
    #[must_use]
    pub fn new(id: u64, config: &ScoringConfig) -> Self {
        let mut record = Self {
            id,
            name: String::new(),
            mistake_count: 0,
            mistake_amount: 0,
            count_score: 0.0,
            amount_score: 0.0,
            average_score: 0.0,
            weighted_score: 0.0,
            deductions: DeductionCandidates::default(),
            decision_policy: config.default_policy,
            final_amount: 0,
        };
        record.recompute(config);
        record
    }

    /// Rewrite every derived field from the current inputs.
    pub fn recompute(&mut self, config: &ScoringConfig) {
        self.count_score = config.count_bands.score(self.mistake_count);
        self.amount_score = config.amount_bands.score(self.mistake_amount);
        self.average_score = average_score(self.count_score, self.amount_score);
        self.weighted_score =
            weighted_score(self.count_score, self.amount_score, config.weighting);
        self.deductions = DeductionCandidates::from_scores(
            config.strategy,
            self.mistake_amount,
            [
                self.count_score,
                self.amount_score,
                self.average_score,
                self.weighted_score,
            ],
        );
        self.final_amount = self.decision_policy.resolve(&self.deductions);
    }

    /// Apply a raw value to `field`, coercing it to the field's type.
    ///
    /// Derived fields are not touched; call [`StaffRecord::recompute`] afterwards.
    pub fn apply(&mut self, field: RecordField, raw: &str, config: &ScoringConfig) {
        match field {
            RecordField::Name => raw.clone_into(&mut self.name),
            RecordField::MistakeCount => self.mistake_count = coerce_non_negative(raw),
            RecordField::MistakeAmount => self.mistake_amount = parse_currency(raw),
            RecordField::DecisionPolicy => {
                self.decision_policy = DecisionPolicy::parse_or(raw, config.default_policy);
            }
        }
    }

    /// Name for display, substituting a placeholder for blank names.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_STAFF_LABEL
        } else {
            &self.name
        }
    }
}

/// The closed set of user-editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Name,
    MistakeCount,
    MistakeAmount,
    DecisionPolicy,
}

impl RecordField {
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::MistakeCount,
        Self::MistakeAmount,
        Self::DecisionPolicy,
    ];

    /// Identifier used in DOM `data-field` attributes.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::MistakeCount => "mistakeCount",
            Self::MistakeAmount => "mistakeAmount",
            Self::DecisionPolicy => "decisionPolicy",
        }
    }
}

/// Raised when a field name matches no editable field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown record field: {0}")]
pub struct FieldParseError(pub String);

impl FromStr for RecordField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "mistakeCount" | "mistakeTxn" => Ok(Self::MistakeCount),
            "mistakeAmount" => Ok(Self::MistakeAmount),
            "decisionPolicy" | "decision" => Ok(Self::DecisionPolicy),
            other => Err(FieldParseError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
