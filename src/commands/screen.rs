//! Pair screening command handler.

use crate::data::MarketDataGenerator;
use crate::report;
use crate::screener;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Arguments for the `screen` subcommand.
#[derive(Debug, Clone)]
pub struct ScreenArgs {
    pub n_stocks: usize,
    pub n_days: usize,
    pub n_cointegrated_pairs: usize,
    pub seed: u64,
    pub config_path: Option<String>,
    pub output_path: Option<String>,
}

/// Generate a synthetic panel and screen it for cointegrated pairs.
pub fn run_screen(args: &ScreenArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- StatArb: Cointegration Screen ---");

    let config = super::load_config(args.config_path.as_deref())?;
    config.screener.validate()?;

    let generator =
        MarketDataGenerator::new(args.n_stocks, args.n_days, args.n_cointegrated_pairs);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let panel = generator.generate(&mut rng)?;

    let selected = screener::find_pairs(&panel, &config.screener)?;
    report::print_selected_pairs(&selected);

    if let Some(path) = &args.output_path {
        report::write_pairs_json(path, &selected)?;
        info!(path = %path, "Wrote accepted pairs");
    }

    Ok(())
}
