//! Configuration for the screening and trading pipeline.
//!
//! Each stage gets its own struct with serde defaults so partial JSON
//! configs work, plus a `validate()` that rejects nonsensical values
//! before any computation starts.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pair-acceptance criteria for the cointegration screener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Cointegration test p-value threshold
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Minimum mean-reversion half-life (time-steps)
    #[serde(default = "default_min_half_life")]
    pub min_half_life: f64,

    /// Maximum mean-reversion half-life (time-steps)
    #[serde(default = "default_max_half_life")]
    pub max_half_life: f64,
}

/// Z-score thresholds and holding limits for the signal engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Z-score magnitude to enter a position
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: f64,

    /// Z-score magnitude to exit on mean reversion (must be < entry)
    #[serde(default = "default_exit_threshold")]
    pub exit_threshold: f64,

    /// Z-score magnitude to exit on stop loss (must be > entry)
    #[serde(default = "default_stop_loss_threshold")]
    pub stop_loss_threshold: f64,

    /// Rolling window length for z-score statistics
    #[serde(default = "default_lookback_period")]
    pub lookback_period: usize,

    /// Forced-exit horizon in time-steps
    #[serde(default = "default_max_position_days")]
    pub max_position_days: u32,
}

/// Portfolio-level caps and weights.
///
/// `capital_per_pair` is applied identically to every traded pair and is
/// deliberately not normalized against `max_pairs`: if their product is
/// not 1, the portfolio runs levered up or down accordingly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Maximum number of pairs traded (positional truncation)
    #[serde(default = "default_max_pairs")]
    pub max_pairs: usize,

    /// Capital fraction allocated to each pair
    #[serde(default = "default_capital_per_pair")]
    pub capital_per_pair: f64,
}

/// Full pipeline configuration, loadable from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BacktestConfig {
    #[serde(default)]
    pub screener: ScreenerConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
}

// Default value functions for serde
fn default_significance_level() -> f64 {
    0.05
}
fn default_min_half_life() -> f64 {
    5.0
}
fn default_max_half_life() -> f64 {
    100.0
}
fn default_entry_threshold() -> f64 {
    2.0
}
fn default_exit_threshold() -> f64 {
    0.5
}
fn default_stop_loss_threshold() -> f64 {
    4.0
}
fn default_lookback_period() -> usize {
    20
}
fn default_max_position_days() -> u32 {
    20
}
fn default_max_pairs() -> usize {
    5
}
fn default_capital_per_pair() -> f64 {
    0.2
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            significance_level: default_significance_level(),
            min_half_life: default_min_half_life(),
            max_half_life: default_max_half_life(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            entry_threshold: default_entry_threshold(),
            exit_threshold: default_exit_threshold(),
            stop_loss_threshold: default_stop_loss_threshold(),
            lookback_period: default_lookback_period(),
            max_position_days: default_max_position_days(),
        }
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            max_pairs: default_max_pairs(),
            capital_per_pair: default_capital_per_pair(),
        }
    }
}

impl ScreenerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.significance_level) {
            return Err(ConfigError::Invalid(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        if self.min_half_life < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_half_life cannot be negative, got {}",
                self.min_half_life
            )));
        }
        if self.max_half_life < self.min_half_life {
            return Err(ConfigError::Invalid(format!(
                "max_half_life {} is below min_half_life {}",
                self.max_half_life, self.min_half_life
            )));
        }
        Ok(())
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "entry_threshold must be positive, got {}",
                self.entry_threshold
            )));
        }
        if self.exit_threshold >= self.entry_threshold {
            return Err(ConfigError::Invalid(format!(
                "exit_threshold {} must be below entry_threshold {}",
                self.exit_threshold, self.entry_threshold
            )));
        }
        if self.stop_loss_threshold <= self.entry_threshold {
            return Err(ConfigError::Invalid(format!(
                "stop_loss_threshold {} must be above entry_threshold {}",
                self.stop_loss_threshold, self.entry_threshold
            )));
        }
        if self.lookback_period < 2 {
            return Err(ConfigError::Invalid(format!(
                "lookback_period must be at least 2, got {}",
                self.lookback_period
            )));
        }
        if self.max_position_days == 0 {
            return Err(ConfigError::Invalid(
                "max_position_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl PortfolioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pairs == 0 {
            return Err(ConfigError::Invalid(
                "max_pairs must be at least 1".to_string(),
            ));
        }
        if self.capital_per_pair <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "capital_per_pair must be positive, got {}",
                self.capital_per_pair
            )));
        }
        Ok(())
    }
}

impl BacktestConfig {
    /// Load a configuration from a JSON file. Missing fields fall back
    /// to their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: BacktestConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.screener.validate()?;
        self.strategy.validate()?;
        self.portfolio.validate()?;
        Ok(())
    }
}
