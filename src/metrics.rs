//! Risk/return statistics for a daily return series.

use crate::returns::compound;
use serde::Serialize;

/// Trading days per year for annualization
const ANNUALIZATION_FACTOR: f64 = 252.0;

/// Performance summary; a pure function of a return series.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRecord {
    pub total_return: f64,
    pub annualized_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub num_trades: usize,
}

/// Annualized Sharpe ratio with zero risk-free rate.
///
/// mean / population-std × √252; 0.0 for empty input or zero deviation.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }

    mean / std_dev * ANNUALIZATION_FACTOR.sqrt()
}

/// Maximum drawdown of a cumulative return curve, as a magnitude.
///
/// Pointwise relative drawdown is (current − running_max) / running_max.
/// Steps where the running maximum is ≤ 0 contribute 0: the relative
/// formula is sign-flipped there and a curve that never rose above its
/// start has nothing to draw down from.
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    let mut running_max = f64::NEG_INFINITY;
    let mut worst = 0.0f64;

    for &value in cumulative {
        running_max = running_max.max(value);
        if running_max > 0.0 {
            let drawdown = (value - running_max) / running_max;
            worst = worst.min(drawdown);
        }
    }

    worst.abs()
}

/// Compounded return of each trade, where a trade is a maximal
/// contiguous run of nonzero daily returns.
fn trade_returns(returns: &[f64]) -> Vec<f64> {
    let mut trades = Vec::new();
    let mut in_trade = false;
    let mut product = 1.0;

    for &ret in returns {
        if ret != 0.0 {
            product *= 1.0 + ret;
            in_trade = true;
        } else if in_trade {
            trades.push(product - 1.0);
            product = 1.0;
            in_trade = false;
        }
    }
    if in_trade {
        trades.push(product - 1.0);
    }

    trades
}

/// Evaluate a daily return series.
pub fn evaluate(returns: &[f64]) -> PerformanceRecord {
    let cumulative = compound(returns);
    let total_return = cumulative.last().copied().unwrap_or(0.0);

    let annualized_return = if returns.is_empty() {
        0.0
    } else {
        (1.0 + total_return).powf(ANNUALIZATION_FACTOR / returns.len() as f64) - 1.0
    };

    let trades = trade_returns(returns);
    let win_rate = if trades.is_empty() {
        0.0
    } else {
        trades.iter().filter(|r| **r > 0.0).count() as f64 / trades.len() as f64
    };

    PerformanceRecord {
        total_return,
        annualized_return,
        sharpe_ratio: sharpe_ratio(returns),
        max_drawdown: max_drawdown(&cumulative),
        win_rate,
        num_trades: trades.len(),
    }
}
