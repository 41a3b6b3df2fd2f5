//! Portfolio aggregation across traded pairs.
//!
//! Runs the signal engine and return calculator over a capped list of
//! pairs, combines their daily returns under a fixed per-pair capital
//! fraction, and evaluates the consolidated series. Pairs are processed
//! strictly in list order so the aggregation is bit-reproducible.

use crate::config::{PortfolioConfig, StrategyConfig};
use crate::metrics::{self, PerformanceRecord};
use crate::panel::{PairId, PricePanel};
use crate::returns::{calculate_returns, compound};
use crate::screener::PairStatsMap;
use crate::signal::generate_signals;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while aggregating the portfolio
#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("instrument '{0}' not present in price panel")]
    UnknownInstrument(String),
}

/// Full per-pair output: signal series plus unscaled returns.
#[derive(Debug, Clone, Serialize)]
pub struct PairResult {
    pub spread: Vec<f64>,
    pub zscore: Vec<f64>,
    pub position_x: Vec<f64>,
    pub position_y: Vec<f64>,
    pub daily_returns: Vec<f64>,
    pub cumulative_returns: Vec<f64>,
}

/// Aggregated portfolio series plus every pair's full result.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResult {
    pub daily_returns: Vec<f64>,
    pub cumulative_returns: Vec<f64>,
    pub pair_results: HashMap<PairId, PairResult>,
}

/// Portfolio series bundled with its performance evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestOutcome {
    pub portfolio: PortfolioResult,
    pub performance: PerformanceRecord,
}

/// Backtest a list of pairs against a price panel.
///
/// Only the first `max_pairs` entries are traded; truncation is purely
/// positional, no quality ranking is applied here. Each traded pair's
/// daily return is scaled by `capital_per_pair` and summed into the
/// portfolio series. The fractions are not normalized across pairs: if
/// `max_pairs × capital_per_pair ≠ 1` the portfolio is implicitly
/// levered. A pair with no hedge ratio on record falls back to 1.0.
pub fn backtest(
    panel: &PricePanel,
    pairs: &[PairId],
    stats: &PairStatsMap,
    strategy: &StrategyConfig,
    portfolio: &PortfolioConfig,
) -> Result<BacktestOutcome, BacktestError> {
    let traded = &pairs[..pairs.len().min(portfolio.max_pairs)];
    let n = panel.len();

    tracing::info!(
        pairs = traded.len(),
        capital_per_pair = portfolio.capital_per_pair,
        steps = n,
        "Running portfolio backtest"
    );

    let mut portfolio_daily = vec![0.0; n];
    let mut pair_results = HashMap::with_capacity(traded.len());

    for pair in traded {
        let price_x = panel
            .series(&pair.x)
            .ok_or_else(|| BacktestError::UnknownInstrument(pair.x.clone()))?;
        let price_y = panel
            .series(&pair.y)
            .ok_or_else(|| BacktestError::UnknownInstrument(pair.y.clone()))?;

        let hedge_ratio = match stats.hedge_ratio(pair) {
            Ok(ratio) => ratio,
            Err(_) => {
                tracing::warn!(pair = %pair, "No hedge ratio on record, falling back to 1.0");
                1.0
            }
        };

        let signals = generate_signals(price_x, price_y, hedge_ratio, strategy);
        let (daily, cumulative) =
            calculate_returns(price_x, price_y, &signals.position_x, &signals.position_y);

        for (total, ret) in portfolio_daily.iter_mut().zip(daily.iter()) {
            *total += ret * portfolio.capital_per_pair;
        }

        tracing::debug!(
            pair = %pair,
            hedge_ratio = format!("{:.4}", hedge_ratio),
            final_return = format!("{:.4}", cumulative.last().copied().unwrap_or(0.0)),
            "Pair backtest complete"
        );

        pair_results.insert(
            pair.clone(),
            PairResult {
                spread: signals.spread,
                zscore: signals.zscore,
                position_x: signals.position_x,
                position_y: signals.position_y,
                daily_returns: daily,
                cumulative_returns: cumulative,
            },
        );
    }

    let cumulative = compound(&portfolio_daily);
    let performance = metrics::evaluate(&portfolio_daily);

    tracing::info!(
        total_return = format!("{:.4}", performance.total_return),
        sharpe = format!("{:.2}", performance.sharpe_ratio),
        trades = performance.num_trades,
        "Portfolio backtest complete"
    );

    Ok(BacktestOutcome {
        portfolio: PortfolioResult {
            daily_returns: portfolio_daily,
            cumulative_returns: cumulative,
            pair_results,
        },
        performance,
    })
}
