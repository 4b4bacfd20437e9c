//! Scoring configuration and the named deployment presets.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::aggregate::Weighting;
use crate::decision::DecisionPolicy;
use crate::deduction::DeductionStrategy;
use crate::score::ScoreBands;

/// Errors raised when scoring configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} thresholds must be positive and strictly increasing (got {bands:?})")]
    BandsNotAscending {
        field: &'static str,
        bands: ScoreBands,
    },
    #[error("weights must be non-negative and sum to 1.0 (count {count:.2}, amount {amount:.2})")]
    WeightsNotNormalized { count: f64, amount: f64 },
    #[error("fixed multiplier cap must be positive")]
    ZeroCap,
    #[error("invalid scoring config JSON: {0}")]
    Json(String),
}

/// Everything that varies between dashboard deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(default = "ScoringConfig::default_count_bands")]
    pub count_bands: ScoreBands,
    #[serde(default = "ScoringConfig::default_amount_bands")]
    pub amount_bands: ScoreBands,
    #[serde(default)]
    pub weighting: Weighting,
    #[serde(default)]
    pub strategy: DeductionStrategy,
    #[serde(default)]
    pub default_policy: DecisionPolicy,
}

impl ScoringConfig {
    const fn default_count_bands() -> ScoreBands {
        ScoreBands::mistake_count()
    }

    const fn default_amount_bands() -> ScoreBands {
        ScoreBands::mistake_amount()
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or violates a configuration invariant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Json(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every invariant the scoring functions rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.count_bands.is_ascending() {
            return Err(ConfigError::BandsNotAscending {
                field: "countBands",
                bands: self.count_bands,
            });
        }
        if !self.amount_bands.is_ascending() {
            return Err(ConfigError::BandsNotAscending {
                field: "amountBands",
                bands: self.amount_bands,
            });
        }
        if !self.weighting.is_normalized() {
            return Err(ConfigError::WeightsNotNormalized {
                count: self.weighting.count,
                amount: self.weighting.amount,
            });
        }
        if matches!(self.strategy, DeductionStrategy::FixedMultiplier { cap_amount: 0 }) {
            return Err(ConfigError::ZeroCap);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Preset::Standard.config()
    }
}

/// Deployments observed in the field, each a complete [`ScoringConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Count-led weighting, 5,000,000 cap.
    #[default]
    Standard,
    /// Amount-led weighting, 1,000,000 cap.
    AmountFocused,
    /// Amount-led weighting, deductions proportional to the mistake amount.
    Proportional,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Standard, Self::AmountFocused, Self::Proportional];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::AmountFocused => "amount-focused",
            Self::Proportional => "proportional",
        }
    }

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Standard => "preset.standard",
            Self::AmountFocused => "preset.amount_focused",
            Self::Proportional => "preset.proportional",
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(label.trim()))
    }

    #[must_use]
    pub const fn config(self) -> ScoringConfig {
        let (weighting, strategy) = match self {
            Self::Standard => (Weighting::count_led(), DeductionStrategy::standard_cap()),
            Self::AmountFocused => (Weighting::amount_led(), DeductionStrategy::reduced_cap()),
            Self::Proportional => (Weighting::amount_led(), DeductionStrategy::Proportional),
        };
        ScoringConfig {
            count_bands: ScoreBands::mistake_count(),
            amount_bands: ScoreBands::mistake_amount(),
            weighting,
            strategy,
            default_policy: DecisionPolicy::Minimum,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for preset in Preset::ALL {
            assert_eq!(preset.config().validate(), Ok(()), "{preset}");
            assert_eq!(Preset::parse(preset.key()), Some(preset));
        }
        assert_eq!(Preset::parse("nope"), None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = ScoringConfig::from_json(
            r#"{"weighting":{"count":0.3,"amount":0.7},"strategy":{"kind":"proportional"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.count_bands, ScoreBands::mistake_count());
        assert_eq!(cfg.strategy, DeductionStrategy::Proportional);
        assert_eq!(cfg.default_policy, DecisionPolicy::Minimum);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let mut cfg = ScoringConfig::default();
        cfg.weighting = Weighting {
            count: 0.9,
            amount: 0.9,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::WeightsNotNormalized { .. })
        ));

        let mut cfg = ScoringConfig::default();
        cfg.strategy = DeductionStrategy::FixedMultiplier { cap_amount: 0 };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCap));

        let mut cfg = ScoringConfig::default();
        cfg.amount_bands.high_max = cfg.amount_bands.low_max;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BandsNotAscending {
                field: "amountBands",
                ..
            })
        ));

        assert!(matches!(
            ScoringConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
