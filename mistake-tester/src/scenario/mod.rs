use anyhow::Result;
use mistake_core::{Preset, ScoringConfig};
use twox_hash::XxHash64;

pub mod catalog;

use catalog::catalog_scenarios;

/// Number of generated `(count, amount)` pairs per iteration.
pub const SWEEP_WIDTH: usize = 16;
const SWEEP_MAX_COUNT: u64 = 30;
const SWEEP_MAX_AMOUNT_THOUSANDS: u64 = 12_000;

/// Everything one iteration of a scenario runs against.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub preset: Preset,
    pub config: ScoringConfig,
    pub seed: u64,
}

impl ScenarioCtx {
    #[must_use]
    pub const fn new(preset: Preset, seed: u64) -> Self {
        Self {
            preset,
            config: preset.config(),
            seed,
        }
    }

    /// Deterministic mistake inputs derived from the iteration seed.
    ///
    /// Amounts land on whole thousands so band edges get hit regularly.
    #[must_use]
    pub fn sweep_inputs(&self) -> Vec<(u64, u64)> {
        (0..SWEEP_WIDTH as u64)
            .map(|i| {
                let h = XxHash64::oneshot(self.seed, &i.to_le_bytes());
                let count = h % (SWEEP_MAX_COUNT + 1);
                let amount = ((h >> 20) % (SWEEP_MAX_AMOUNT_THOUSANDS + 1)) * 1_000;
                (count, amount)
            })
            .collect()
    }
}

pub type Expectation = fn(&ScenarioCtx) -> Result<()>;

#[derive(Clone)]
pub struct LogicScenario {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    expectation: Expectation,
}

impl LogicScenario {
    #[must_use]
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        expectation: Expectation,
    ) -> Self {
        Self {
            key,
            name,
            description,
            expectation,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Run the expectation once.
    ///
    /// # Errors
    /// Returns the first violated expectation.
    pub fn check(&self, ctx: &ScenarioCtx) -> Result<()> {
        (self.expectation)(ctx)
    }
}

impl std::fmt::Debug for LogicScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicScenario")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub fn get_scenario(key: &str) -> Option<LogicScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key().eq_ignore_ascii_case(key.trim()))
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .iter()
        .map(|scenario| (scenario.key(), scenario.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_inputs_are_deterministic_per_seed() {
        let a = ScenarioCtx::new(Preset::Standard, 7).sweep_inputs();
        let b = ScenarioCtx::new(Preset::Proportional, 7).sweep_inputs();
        let c = ScenarioCtx::new(Preset::Standard, 8).sweep_inputs();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), SWEEP_WIDTH);
        assert!(a.iter().all(|(count, amount)| {
            *count <= SWEEP_MAX_COUNT && amount % 1_000 == 0 && *amount <= 12_000_000
        }));
    }

    #[test]
    fn scenarios_resolve_by_key() {
        assert!(get_scenario("smoke").is_some());
        assert!(get_scenario(" Resolver-Reference ").is_some());
        assert!(get_scenario("nope").is_none());
        let listed = list_scenarios();
        assert_eq!(listed.len(), catalog_scenarios().len());
        assert!(listed.iter().all(|(_, description)| !description.is_empty()));
    }
}
