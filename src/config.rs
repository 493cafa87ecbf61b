//! Engine and formatting configuration
//!
//! Settings can be built in code or loaded from a TOML, YAML or JSON file;
//! every field has a default so a partial file is enough.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::stats::regression::MIN_FIT_OBSERVATIONS;

/// Default minimum number of aligned rows required to fit a pair
pub const DEFAULT_MIN_OBSERVATIONS: usize = 10;

/// Default number of decimal places in formatted statistics
pub const DEFAULT_PRECISION: usize = 4;

const MAX_PRECISION: usize = 12;

/// What to do when a selected series has no entry in the shift map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingShiftPolicy {
    /// Reject the whole batch with [`Error::MissingShift`]
    #[default]
    Strict,
    /// Treat an absent shift as zero
    DefaultZero,
}

/// Settings for the pairwise regression engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pairs with fewer aligned rows are skipped as insufficient data
    pub min_observations: usize,
    /// Handling of selected series without a shift
    pub missing_shift: MissingShiftPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            missing_shift: MissingShiftPolicy::Strict,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_observations < MIN_FIT_OBSERVATIONS {
            return Err(Error::InvalidConfig(format!(
                "min_observations must be at least {} (got {})",
                MIN_FIT_OBSERVATIONS, self.min_observations
            )));
        }
        Ok(())
    }
}

/// Settings for result formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Decimal places for floating point statistics
    pub precision: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FormatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "precision must be at most {} (got {})",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub format: FormatConfig,
}

impl Config {
    /// Load a configuration file, choosing the parser from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config: Config = match extension.as_deref() {
            Some("toml") => toml::from_str(&contents)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            Some("json") => serde_json::from_str(&contents)?,
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        self.format.validate()
    }
}
