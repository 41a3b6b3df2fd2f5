//! Error types for the screener module

use crate::panel::PairId;
use thiserror::Error;

/// Errors that can occur during pair screening and stats lookup
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// No pairs passed the cointegration and half-life filters. A normal
    /// outcome for adversarial inputs, surfaced so the caller can halt.
    #[error("no cointegrated pairs found (p-value < {significance_level}, half-life in [{min_half_life}, {max_half_life}])")]
    NoPairsFound {
        significance_level: f64,
        min_half_life: f64,
        max_half_life: f64,
    },

    /// Hedge-ratio lookup for a pair absent in either orientation
    #[error("pair {0} not present in pair statistics")]
    UnknownPair(PairId),
}
