use anyhow::{Context, Result};
use std::env;

use crate::models::DistanceUnit;

pub const SEED_VAR: &str = "RACE_PLANNER_SEED";
pub const UNIT_VAR: &str = "RACE_PLANNER_UNIT";

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSettings {
    /// Fixed seed for the quality-workout coin flip; entropy when unset
    pub seed: Option<u64>,
    /// Unit override; callers fall back to their own default when unset
    pub distance_unit: Option<DistanceUnit>,
}

impl PlanSettings {
    /// Create settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create settings from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup(SEED_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} must be an unsigned integer, got '{}'", SEED_VAR, raw))
            })
            .transpose()?;

        let distance_unit = lookup(UNIT_VAR)
            .map(|raw| raw.parse::<DistanceUnit>().with_context(|| format!("Invalid {}", UNIT_VAR)))
            .transpose()?;

        Ok(Self { seed, distance_unit })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.distance_unit = Some(unit);
        self
    }
}
