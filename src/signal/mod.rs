//! Spread signal engine.
//!
//! Computes the spread between two legs, its rolling z-score, and the
//! position series produced by an explicit finite-state trading
//! automaton. The automaton's transition function is pure: all carried
//! state (previous position, days held) is passed in and returned, never
//! hidden in mutable counters.

use crate::config::StrategyConfig;
use serde::Serialize;

/// Per-time-step position for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionState {
    /// No exposure
    Flat,
    /// Long the spread: long leg x, short leg y
    LongSpread,
    /// Short the spread: short leg x, long leg y
    ShortSpread,
}

/// Signal series for one pair; every vector matches the input length.
#[derive(Debug, Clone, Serialize)]
pub struct SignalSeries {
    pub spread: Vec<f64>,
    pub zscore: Vec<f64>,
    pub position_x: Vec<f64>,
    pub position_y: Vec<f64>,
}

/// Spread = price_y − hedge_ratio · price_x.
pub fn compute_spread(price_x: &[f64], price_y: &[f64], hedge_ratio: f64) -> Vec<f64> {
    price_x
        .iter()
        .zip(price_y.iter())
        .map(|(x, y)| y - hedge_ratio * x)
        .collect()
}

/// Rolling z-score of a spread over a trailing window.
///
/// Indices before `window` are 0 (no signal during warm-up); from
/// `window` onward the z-score uses the mean and sample standard
/// deviation of the `window` trailing observations ending at the
/// current index. A zero rolling deviation yields 0 rather than a
/// division by zero.
pub fn rolling_zscore(spread: &[f64], window: usize) -> Vec<f64> {
    let n = spread.len();
    let mut zscore = vec![0.0; n];
    if window < 2 || n <= window {
        return zscore;
    }

    for t in window..n {
        let trailing = &spread[t + 1 - window..=t];
        let mean = trailing.iter().sum::<f64>() / window as f64;
        let variance = trailing
            .iter()
            .map(|value| {
                let diff = value - mean;
                diff * diff
            })
            .sum::<f64>()
            / (window as f64 - 1.0);
        let std_dev = variance.sqrt();

        if std_dev > 0.0 && std_dev.is_finite() {
            zscore[t] = (spread[t] - mean) / std_dev;
        }
    }

    zscore
}

/// Pure transition function of the trading automaton.
///
/// Takes the state and days-held counter carried from the previous
/// step plus the current z-score, returns the new state and counter.
/// Entry and exit are evaluated in mutually exclusive branches keyed on
/// the previous state, so an exit never re-enters in the same step.
pub fn transition(
    state: PositionState,
    days_held: u32,
    zscore: f64,
    config: &StrategyConfig,
) -> (PositionState, u32) {
    match state {
        PositionState::Flat => {
            if zscore < -config.entry_threshold {
                (PositionState::LongSpread, 1)
            } else if zscore > config.entry_threshold {
                (PositionState::ShortSpread, 1)
            } else {
                (PositionState::Flat, 0)
            }
        }
        PositionState::LongSpread => {
            let days = days_held + 1;
            let reverted = zscore > -config.exit_threshold;
            let stopped = zscore < -config.stop_loss_threshold;
            if reverted || stopped || days >= config.max_position_days {
                (PositionState::Flat, 0)
            } else {
                (PositionState::LongSpread, days)
            }
        }
        PositionState::ShortSpread => {
            let days = days_held + 1;
            let reverted = zscore < config.exit_threshold;
            let stopped = zscore > config.stop_loss_threshold;
            if reverted || stopped || days >= config.max_position_days {
                (PositionState::Flat, 0)
            } else {
                (PositionState::ShortSpread, days)
            }
        }
    }
}

/// Generate the spread, z-score and both leg position series for a pair.
///
/// Positions are forced to (0, 0) for every index before
/// `lookback_period`; from there the automaton runs one transition per
/// step. When holding, leg y carries −hedge_ratio times the leg-x
/// position so the pair stays ratio-hedged.
pub fn generate_signals(
    price_x: &[f64],
    price_y: &[f64],
    hedge_ratio: f64,
    config: &StrategyConfig,
) -> SignalSeries {
    let n = price_x.len();
    let spread = compute_spread(price_x, price_y, hedge_ratio);
    let zscore = rolling_zscore(&spread, config.lookback_period);

    let mut position_x = vec![0.0; n];
    let mut position_y = vec![0.0; n];

    let mut state = PositionState::Flat;
    let mut days_held = 0u32;

    for t in config.lookback_period.min(n)..n {
        let (next_state, next_days) = transition(state, days_held, zscore[t], config);
        state = next_state;
        days_held = next_days;

        match state {
            PositionState::Flat => {}
            PositionState::LongSpread => {
                position_x[t] = 1.0;
                position_y[t] = -hedge_ratio;
            }
            PositionState::ShortSpread => {
                position_x[t] = -1.0;
                position_y[t] = hedge_ratio;
            }
        }
    }

    SignalSeries {
        spread,
        zscore,
        position_x,
        position_y,
    }
}
