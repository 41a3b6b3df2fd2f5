//! Full backtest command handler.
//!
//! Pipeline: generate synthetic data, split into train/test, screen the
//! training window for cointegrated pairs, then trade those pairs on
//! the test window and report performance.

use crate::data::MarketDataGenerator;
use crate::panel::PairId;
use crate::portfolio;
use crate::report;
use crate::screener::{self, PairStatsMap};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Arguments for the `backtest` subcommand. Optional fields override
/// the loaded configuration when present.
#[derive(Debug, Clone)]
pub struct BacktestArgs {
    pub n_stocks: usize,
    pub n_days: usize,
    pub n_cointegrated_pairs: usize,
    pub seed: u64,
    pub train_ratio: f64,
    pub entry_threshold: Option<f64>,
    pub exit_threshold: Option<f64>,
    pub max_pairs: Option<usize>,
    pub config_path: Option<String>,
    pub output_path: Option<String>,
}

/// Run the end-to-end screen-then-trade backtest.
pub fn run_backtest(args: &BacktestArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- StatArb: Statistical Arbitrage Backtest ---");

    let mut config = super::load_config(args.config_path.as_deref())?;
    if let Some(entry) = args.entry_threshold {
        config.strategy.entry_threshold = entry;
    }
    if let Some(exit) = args.exit_threshold {
        config.strategy.exit_threshold = exit;
    }
    if let Some(max_pairs) = args.max_pairs {
        config.portfolio.max_pairs = max_pairs;
    }
    config.validate()?;

    if !(0.0..1.0).contains(&args.train_ratio) {
        return Err(format!("train_ratio must be in (0, 1), got {}", args.train_ratio).into());
    }

    let generator =
        MarketDataGenerator::new(args.n_stocks, args.n_days, args.n_cointegrated_pairs);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let panel = generator.generate(&mut rng)?;

    let (train, test) = panel.split(args.train_ratio);
    info!(
        train_steps = train.len(),
        test_steps = test.len(),
        "Split panel"
    );

    // Select pairs on the training window only
    let selected = screener::find_pairs(&train, &config.screener)?;
    report::print_selected_pairs(&selected);

    let pairs: Vec<PairId> = selected.iter().map(|s| s.pair.clone()).collect();
    let stats = PairStatsMap::from_pairs(&selected);

    let outcome = portfolio::backtest(
        &test,
        &pairs,
        &stats,
        &config.strategy,
        &config.portfolio,
    )?;
    report::print_performance(&outcome.performance);

    if let Some(path) = &args.output_path {
        report::write_outcome_json(path, &outcome)?;
        info!(path = %path, "Wrote backtest outcome");
    }

    Ok(())
}
