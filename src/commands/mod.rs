//! CLI command handlers.
//!
//! One handler per subcommand, delegating to the screening and
//! backtesting pipeline.

mod backtest;
mod screen;

pub use backtest::{run_backtest, BacktestArgs};
pub use screen::{run_screen, ScreenArgs};

use crate::config::{BacktestConfig, ConfigError};

/// Load the pipeline configuration from a file if given, otherwise use
/// the defaults.
fn load_config(path: Option<&str>) -> Result<BacktestConfig, ConfigError> {
    match path {
        Some(path) => BacktestConfig::from_file(path),
        None => Ok(BacktestConfig::default()),
    }
}
