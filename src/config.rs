//! Simulation settings, loadable from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! `SimulationConfig::default()`.

use crate::error::{PayoffError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default hard cap on simulated months.
pub const DEFAULT_MAX_MONTHS: u32 = 1000;

/// Balances at or below this amount count as paid off.
pub const DEFAULT_EPSILON: Decimal = dec!(0.01);

/// Decimal places kept when reporting the interest total.
pub const DEFAULT_DISPLAY_PRECISION: u32 = 2;

const MAX_DISPLAY_PRECISION: u32 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hard cap on simulated months. Reaching it with money still owed
    /// ends the run as non-convergent.
    pub max_months: u32,
    /// Clearance threshold in currency units.
    pub epsilon: Decimal,
    /// Rounding applied to `total_interest_paid` when the result is built.
    pub display_precision: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            epsilon: DEFAULT_EPSILON,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl SimulationConfig {
    /// Loads and validates a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            PayoffError::ConfigError(msg) => {
                PayoffError::ConfigError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PayoffError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.epsilon <= Decimal::ZERO {
            return Err(PayoffError::ConfigError(
                "epsilon must be positive".to_string(),
            ));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(PayoffError::ConfigError(format!(
                "display_precision must be at most {MAX_DISPLAY_PRECISION}"
            )));
        }
        Ok(())
    }
}
