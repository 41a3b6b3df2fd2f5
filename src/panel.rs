//! Aligned price panel and pair identifiers.
//!
//! A [`PricePanel`] is the immutable input to the whole pipeline: one
//! positive price series per instrument, all series time-aligned and of
//! identical length. Instruments keep their insertion order so that pair
//! enumeration is deterministic.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while assembling a price panel.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("panel must contain at least one instrument")]
    Empty,

    #[error("duplicate instrument '{0}' in panel")]
    DuplicateInstrument(String),

    #[error("series length mismatch for '{instrument}': expected {expected}, got {actual}")]
    LengthMismatch {
        instrument: String,
        expected: usize,
        actual: usize,
    },

    #[error("non-positive price {price} for '{instrument}' at index {index}")]
    NonPositivePrice {
        instrument: String,
        index: usize,
        price: f64,
    },
}

/// Ordered-by-time mapping from instrument identifier to an aligned
/// positive price series.
#[derive(Debug, Clone)]
pub struct PricePanel {
    instruments: Vec<String>,
    series: HashMap<String, Vec<f64>>,
    len: usize,
}

impl PricePanel {
    /// Build a panel from `(instrument, prices)` columns.
    ///
    /// All series must be non-empty, equal in length and strictly
    /// positive. Column order is preserved and drives pair enumeration.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self, PanelError> {
        let len = columns
            .first()
            .map(|(_, prices)| prices.len())
            .ok_or(PanelError::Empty)?;

        let mut instruments = Vec::with_capacity(columns.len());
        let mut series = HashMap::with_capacity(columns.len());

        for (instrument, prices) in columns {
            if series.contains_key(&instrument) {
                return Err(PanelError::DuplicateInstrument(instrument));
            }
            if prices.len() != len {
                return Err(PanelError::LengthMismatch {
                    instrument,
                    expected: len,
                    actual: prices.len(),
                });
            }
            if let Some((index, &price)) = prices
                .iter()
                .enumerate()
                .find(|(_, p)| !(p.is_finite() && **p > 0.0))
            {
                return Err(PanelError::NonPositivePrice {
                    instrument,
                    index,
                    price,
                });
            }
            instruments.push(instrument.clone());
            series.insert(instrument, prices);
        }

        Ok(Self {
            instruments,
            series,
            len,
        })
    }

    /// Number of time steps shared by every series.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Instrument identifiers in panel order.
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Price series for one instrument, if present.
    pub fn series(&self, instrument: &str) -> Option<&[f64]> {
        self.series.get(instrument).map(Vec::as_slice)
    }

    /// Split the panel at `floor(len * train_ratio)` into a leading
    /// (train) and trailing (test) panel.
    pub fn split(&self, train_ratio: f64) -> (PricePanel, PricePanel) {
        let cut = ((self.len as f64) * train_ratio).floor() as usize;
        let cut = cut.min(self.len);

        let take = |range: std::ops::Range<usize>| {
            let columns: Vec<(String, Vec<f64>)> = self
                .instruments
                .iter()
                .map(|name| (name.clone(), self.series[name][range.clone()].to_vec()))
                .collect();
            PricePanel {
                len: range.len(),
                instruments: self.instruments.clone(),
                series: columns.into_iter().collect(),
            }
        };

        (take(0..cut), take(cut..self.len))
    }
}

/// Ordered pair of instrument identifiers with fixed role semantics:
/// `x` is the independent leg and `y` the dependent leg of the
/// cointegrating regression. Used directly as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairId {
    pub x: String,
    pub y: String,
}

impl PairId {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// The same pair with the leg roles swapped.
    pub fn reversed(&self) -> PairId {
        PairId {
            x: self.y.clone(),
            y: self.x.clone(),
        }
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

// Serialized as the display string so pair-keyed maps stay valid JSON.
impl Serialize for PairId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
