use clap::Parser;
use statarb::cli::{Cli, Commands};
use statarb::commands::{run_backtest, run_screen, BacktestArgs, ScreenArgs};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.verbose).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Screen {
            n_stocks,
            n_days,
            n_cointegrated_pairs,
            seed,
            config,
            output,
        } => run_screen(&ScreenArgs {
            n_stocks,
            n_days,
            n_cointegrated_pairs,
            seed,
            config_path: config,
            output_path: output,
        }),
        Commands::Backtest {
            n_stocks,
            n_days,
            n_cointegrated_pairs,
            seed,
            train_ratio,
            entry_threshold,
            exit_threshold,
            max_pairs,
            config,
            output,
        } => run_backtest(&BacktestArgs {
            n_stocks,
            n_days,
            n_cointegrated_pairs,
            seed,
            train_ratio,
            entry_threshold,
            exit_threshold,
            max_pairs,
            config_path: config,
            output_path: output,
        }),
    }
}
