//! Calculation defaults and their environment overrides
//!
//! Reads:
//!   TVM_IRR_ITERATIONS, TVM_PERIODS_PER_YEAR, TVM_TOLERANCE
//! Unset or unparseable values fall back to the defaults below. The IRR
//! starting guess is fixed at `DEFAULT_INITIAL_GUESS` and is not configurable.

use serde::{Deserialize, Serialize};
use std::env;

/// Default Newton-Raphson iteration budget
pub const DEFAULT_IRR_ITERATIONS: u32 = 100;

/// Settings shared by the CLI, the Lambda handler and the batch runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Newton-Raphson steps per IRR estimate
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Periods per year used when annualizing a periodic IRR (1 = already annual)
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,

    /// Optional early-exit tolerance on the rate step; None runs the full budget
    #[serde(default)]
    pub tolerance: Option<f64>,
}

fn default_iterations() -> u32 { DEFAULT_IRR_ITERATIONS }
fn default_periods_per_year() -> u32 { 1 }

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            periods_per_year: default_periods_per_year(),
            tolerance: None,
        }
    }
}

impl CalcConfig {
    /// Build a config from `TVM_*` environment variables over the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (used by `from_env` and tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let iterations: u32 = lookup("TVM_IRR_ITERATIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.iterations);

        let periods_per_year: u32 = lookup("TVM_PERIODS_PER_YEAR")
            .and_then(|s| s.parse().ok())
            .filter(|&k| k > 0)
            .unwrap_or(defaults.periods_per_year);

        let tolerance: Option<f64> = lookup("TVM_TOLERANCE")
            .and_then(|s| s.parse().ok())
            .filter(|&t: &f64| t.is_finite() && t > 0.0);

        Self {
            iterations,
            periods_per_year,
            tolerance,
        }
    }
}
