//! Cointegration screening for candidate pairs.
//!
//! Enumerates every 2-combination of panel instruments, tests each with
//! the Engle-Granger two-step method, estimates the hedge ratio by OLS,
//! and filters by a mean-reversion half-life window. Pairs are emitted
//! in enumeration order; no ranking is applied, callers that want the
//! "best" pairs sort separately.

pub mod error;
pub mod stats;

pub use error::ScreenerError;

use crate::config::ScreenerConfig;
use crate::panel::{PairId, PricePanel};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Statistics for an accepted pair.
///
/// Invariant: `p_value < significance_level` and the half-life lies in
/// the configured acceptance window.
#[derive(Debug, Clone, Serialize)]
pub struct PairStats {
    /// Engle-Granger cointegration test p-value
    pub p_value: f64,
    /// OLS slope of the dependent leg on the independent leg
    pub hedge_ratio: f64,
    /// Mean-reversion half-life in time-steps
    pub half_life: f64,
}

/// A pair that survived all screening filters.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedPair {
    pub pair: PairId,
    pub stats: PairStats,
}

/// Pair-keyed statistics with orientation-aware hedge-ratio lookup.
#[derive(Debug, Clone, Default)]
pub struct PairStatsMap {
    inner: HashMap<PairId, PairStats>,
}

impl PairStatsMap {
    pub fn from_pairs(pairs: &[SelectedPair]) -> Self {
        Self {
            inner: pairs
                .iter()
                .map(|selected| (selected.pair.clone(), selected.stats.clone()))
                .collect(),
        }
    }

    pub fn get(&self, pair: &PairId) -> Option<&PairStats> {
        self.inner.get(pair)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Hedge ratio for a pair in the requested orientation.
    ///
    /// When only the reversed orientation is on record the ratio
    /// inverts: β(y on x) stored means 1/β is returned for (y, x).
    /// Fails with [`ScreenerError::UnknownPair`] when neither
    /// orientation is present; no default is substituted here.
    pub fn hedge_ratio(&self, pair: &PairId) -> Result<f64, ScreenerError> {
        if let Some(stats) = self.inner.get(pair) {
            return Ok(stats.hedge_ratio);
        }
        if let Some(stats) = self.inner.get(&pair.reversed()) {
            return Ok(1.0 / stats.hedge_ratio);
        }
        Err(ScreenerError::UnknownPair(pair.clone()))
    }
}

/// Screen every unordered pair of panel instruments.
///
/// For each candidate `(x, y)` in enumeration order:
/// 1. Engle-Granger: OLS of y on x, ADF on the residual, p-value.
/// 2. Hedge ratio = the OLS slope; spread = y − β·x.
/// 3. Half-life from an AR(1) fit of the spread's changes.
///
/// A pair is accepted iff `p_value < significance_level` and the
/// half-life lies in `[min_half_life, max_half_life]` (an infinite
/// half-life always fails). An empty result is reported as
/// [`ScreenerError::NoPairsFound`].
pub fn find_pairs(
    panel: &PricePanel,
    config: &ScreenerConfig,
) -> Result<Vec<SelectedPair>, ScreenerError> {
    let instruments = panel.instruments();
    let mut selected = Vec::new();
    let mut rejected_pvalue = 0u32;
    let mut rejected_half_life = 0u32;

    info!(
        instruments = instruments.len(),
        significance = config.significance_level,
        min_hl = config.min_half_life,
        max_hl = config.max_half_life,
        "Screening pair candidates"
    );

    for i in 0..instruments.len() {
        for j in (i + 1)..instruments.len() {
            let pair = PairId::new(instruments[i].clone(), instruments[j].clone());

            // Instruments come from the panel itself, so both series exist
            let Some(price_x) = panel.series(&pair.x) else {
                continue;
            };
            let Some(price_y) = panel.series(&pair.y) else {
                continue;
            };

            let Some((p_value, hedge_ratio)) = stats::engle_granger(price_x, price_y) else {
                debug!(pair = %pair, "Degenerate regression, skipping");
                continue;
            };

            if p_value >= config.significance_level {
                debug!(
                    pair = %pair,
                    p_value = format!("{:.4}", p_value),
                    "Not cointegration-significant"
                );
                rejected_pvalue += 1;
                continue;
            }

            let spread: Vec<f64> = price_x
                .iter()
                .zip(price_y.iter())
                .map(|(x, y)| y - hedge_ratio * x)
                .collect();
            let half_life = stats::half_life(&spread);

            if !(config.min_half_life..=config.max_half_life).contains(&half_life) {
                debug!(
                    pair = %pair,
                    half_life = format!("{:.1}", half_life),
                    "Half-life outside acceptance window"
                );
                rejected_half_life += 1;
                continue;
            }

            info!(
                pair = %pair,
                p_value = format!("{:.4}", p_value),
                hedge_ratio = format!("{:.4}", hedge_ratio),
                half_life = format!("{:.1}", half_life),
                "Cointegrated pair accepted"
            );

            selected.push(SelectedPair {
                pair,
                stats: PairStats {
                    p_value,
                    hedge_ratio,
                    half_life,
                },
            });
        }
    }

    info!(
        accepted = selected.len(),
        rejected_pvalue,
        rejected_half_life,
        "Screening complete"
    );

    if selected.is_empty() {
        return Err(ScreenerError::NoPairsFound {
            significance_level: config.significance_level,
            min_half_life: config.min_half_life,
            max_half_life: config.max_half_life,
        });
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_map_with(pair: PairId, hedge_ratio: f64) -> PairStatsMap {
        PairStatsMap::from_pairs(&[SelectedPair {
            pair,
            stats: PairStats {
                p_value: 0.01,
                hedge_ratio,
                half_life: 10.0,
            },
        }])
    }

    #[test]
    fn test_hedge_ratio_direct_lookup() {
        let map = stats_map_with(PairId::new("A", "B"), 0.5);
        let ratio = map.hedge_ratio(&PairId::new("A", "B")).unwrap();
        assert_eq!(ratio, 0.5);
    }

    #[test]
    fn test_hedge_ratio_reversed_is_reciprocal() {
        let map = stats_map_with(PairId::new("A", "B"), 0.5);
        let ratio = map.hedge_ratio(&PairId::new("B", "A")).unwrap();
        assert_eq!(ratio, 2.0);
    }

    #[test]
    fn test_hedge_ratio_unknown_pair_errors() {
        let map = stats_map_with(PairId::new("A", "B"), 0.5);
        let err = map.hedge_ratio(&PairId::new("C", "D")).unwrap_err();
        assert!(matches!(err, ScreenerError::UnknownPair(_)));
    }

    #[test]
    fn test_no_pairs_found_for_flat_panel() {
        // Two identical constant-growth series: the cointegrating
        // regression is exact, residuals are constant, ADF degenerates
        // to 0.0 and the p-value is insignificant.
        let a: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        let b: Vec<f64> = (1..=60).map(|i| (i * 2) as f64).collect();
        let panel = PricePanel::new(vec![("A".to_string(), a), ("B".to_string(), b)]).unwrap();

        let err = find_pairs(&panel, &ScreenerConfig::default()).unwrap_err();
        assert!(matches!(err, ScreenerError::NoPairsFound { .. }));
    }

    #[test]
    fn test_engineered_pair_is_accepted_in_order() {
        // y = 0.5*x + strongly mean-reverting residual
        let n = 300;
        let x: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64) * 0.05).collect();
        let mut noise = 1.0f64;
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, xi)| {
                let shock = ((i * 37) % 13) as f64 / 13.0 - 0.5;
                noise = 0.8 * noise + shock;
                0.5 * xi + 10.0 + noise
            })
            .collect();

        let panel =
            PricePanel::new(vec![("X".to_string(), x), ("Y".to_string(), y)]).unwrap();
        let config = ScreenerConfig {
            min_half_life: 0.5,
            ..Default::default()
        };
        let selected = find_pairs(&panel, &config).unwrap();

        assert_eq!(selected.len(), 1);
        let pair = &selected[0];
        assert_eq!(pair.pair, PairId::new("X", "Y"));
        assert!(pair.stats.p_value < 0.05);
        assert!((pair.stats.hedge_ratio - 0.5).abs() < 0.1);
        assert!(pair.stats.half_life.is_finite());
    }
}
