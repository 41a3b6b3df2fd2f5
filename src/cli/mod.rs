//! CLI argument parsing using clap.

use clap::{Parser, Subcommand};

/// StatArb - Statistical Arbitrage Pairs Backtester
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Screen a synthetic panel for cointegrated pairs
    Screen {
        /// Number of stocks to generate
        #[arg(long, default_value_t = 20)]
        n_stocks: usize,
        /// Number of trading days
        #[arg(long, default_value_t = 1000)]
        n_days: usize,
        /// Number of engineered cointegrated pairs
        #[arg(long, default_value_t = 5)]
        n_cointegrated_pairs: usize,
        /// RNG seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<String>,
        /// Write accepted pairs to this JSON file
        #[arg(long)]
        output: Option<String>,
    },

    /// Run the full screen-then-trade backtest on synthetic data
    Backtest {
        /// Number of stocks to generate
        #[arg(long, default_value_t = 20)]
        n_stocks: usize,
        /// Number of trading days
        #[arg(long, default_value_t = 1000)]
        n_days: usize,
        /// Number of engineered cointegrated pairs
        #[arg(long, default_value_t = 5)]
        n_cointegrated_pairs: usize,
        /// RNG seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Fraction of data used for pair selection (rest is traded)
        #[arg(long, default_value_t = 0.7)]
        train_ratio: f64,
        /// Z-score threshold for entering a position
        #[arg(long)]
        entry_threshold: Option<f64>,
        /// Z-score threshold for exiting a position
        #[arg(long)]
        exit_threshold: Option<f64>,
        /// Maximum number of pairs traded simultaneously
        #[arg(long)]
        max_pairs: Option<usize>,
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<String>,
        /// Write the full outcome to this JSON file
        #[arg(long)]
        output: Option<String>,
    },
}
