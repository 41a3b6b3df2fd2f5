//! Console and JSON rendering of screening and backtest results.

use crate::metrics::PerformanceRecord;
use crate::portfolio::BacktestOutcome;
use crate::screener::SelectedPair;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Print the accepted pairs with their screening statistics.
pub fn print_selected_pairs(pairs: &[SelectedPair]) {
    println!("\n--- Cointegrated Pairs ({}) ---", pairs.len());
    for selected in pairs {
        println!(
            "{:<24} p-value={:.4}  hedge_ratio={:.4}  half_life={:.1}",
            selected.pair.to_string(),
            selected.stats.p_value,
            selected.stats.hedge_ratio,
            selected.stats.half_life,
        );
    }
    println!("-------------------------------");
}

/// Print the portfolio performance summary.
pub fn print_performance(record: &PerformanceRecord) {
    println!("\n--- Performance Metrics ---");
    println!("Total Return:      {:.2}%", record.total_return * 100.0);
    println!("Annualized Return: {:.2}%", record.annualized_return * 100.0);
    println!("Sharpe Ratio:      {:.2}", record.sharpe_ratio);
    println!("Max Drawdown:      {:.2}%", record.max_drawdown * 100.0);
    println!("Win Rate:          {:.2}%", record.win_rate * 100.0);
    println!("Total Trades:      {}", record.num_trades);
    println!("---------------------------");
}

/// Write the full backtest outcome as pretty-printed JSON.
pub fn write_outcome_json(
    path: impl AsRef<Path>,
    outcome: &BacktestOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcome)?;
    writer.flush()?;
    Ok(())
}

/// Write the accepted pairs as pretty-printed JSON.
pub fn write_pairs_json(
    path: impl AsRef<Path>,
    pairs: &[SelectedPair],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, pairs)?;
    writer.flush()?;
    Ok(())
}
