//! Synthetic market data generation.
//!
//! Produces a price panel of independent random walks with a chosen
//! number of engineered cointegrated pairs whose spread follows a
//! discretized Ornstein-Uhlenbeck process. The pseudorandom generator
//! is an explicit instance threaded through the call, so the same seed
//! always reproduces the same panel.

use crate::panel::{PairId, PanelError, PricePanel};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use tracing::info;

/// Daily drift of the random-walk returns
const DRIFT: f64 = 0.0001;
/// Daily volatility of the random-walk returns
const VOLATILITY: f64 = 0.01;
/// Standard deviation of the OU spread innovations
const SPREAD_NOISE_STD: f64 = 0.1;

/// Generator for a synthetic equity-like price panel.
#[derive(Debug, Clone)]
pub struct MarketDataGenerator {
    n_stocks: usize,
    n_days: usize,
    n_cointegrated_pairs: usize,
}

impl MarketDataGenerator {
    /// Create a generator. The number of engineered pairs is capped at
    /// `n_stocks / 2` since each pair consumes two instruments.
    pub fn new(n_stocks: usize, n_days: usize, n_cointegrated_pairs: usize) -> Self {
        Self {
            n_stocks,
            n_days,
            n_cointegrated_pairs: n_cointegrated_pairs.min(n_stocks / 2),
        }
    }

    /// Instrument names, `STOCK_1` through `STOCK_n`.
    fn stock_names(&self) -> Vec<String> {
        (1..=self.n_stocks).map(|i| format!("STOCK_{i}")).collect()
    }

    /// The pairs engineered to be cointegrated, in generation order.
    /// Pair i links instruments 2i and 2i+1; the second leg is the
    /// dependent one, so the expected hedge ratio is the cointegration
    /// factor drawn during generation.
    pub fn engineered_pairs(&self) -> Vec<PairId> {
        (0..self.n_cointegrated_pairs)
            .map(|i| PairId::new(format!("STOCK_{}", 2 * i + 1), format!("STOCK_{}", 2 * i + 2)))
            .collect()
    }

    /// Generate the panel using the supplied RNG instance.
    ///
    /// Every instrument starts as an independent random walk; for each
    /// engineered pair the second leg is then rewritten as
    /// `factor · leg1 + spread`, where the spread is an OU process with
    /// reversion speed drawn from U(0.02, 0.05) and the factor from
    /// U(0.5, 1.5).
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<PricePanel, PanelError> {
        let normal_returns = Normal::new(DRIFT, VOLATILITY).expect("valid return distribution");
        let spread_noise = Normal::new(0.0, SPREAD_NOISE_STD).expect("valid noise distribution");
        let unit_normal = Normal::new(0.0, 1.0).expect("valid unit normal");
        let start_price = Uniform::new(10.0, 100.0);
        let factor_range = Uniform::new(0.5, 1.5);
        let reversion_range = Uniform::new(0.02, 0.05);

        let mut prices: Vec<Vec<f64>> = Vec::with_capacity(self.n_stocks);
        for _ in 0..self.n_stocks {
            let mut series = Vec::with_capacity(self.n_days);
            series.push(start_price.sample(rng));
            for t in 1..self.n_days {
                let ret = normal_returns.sample(rng);
                series.push(series[t - 1] * (1.0 + ret));
            }
            prices.push(series);
        }

        for i in 0..self.n_cointegrated_pairs {
            let idx1 = 2 * i;
            let idx2 = 2 * i + 1;

            let factor = factor_range.sample(rng);
            let reversion_speed = reversion_range.sample(rng);

            let mut spread = unit_normal.sample(rng);
            for t in 1..self.n_days {
                spread = spread - reversion_speed * spread + spread_noise.sample(rng);
                prices[idx2][t] = factor * prices[idx1][t] + spread;
            }
        }

        info!(
            stocks = self.n_stocks,
            days = self.n_days,
            cointegrated_pairs = self.n_cointegrated_pairs,
            "Generated synthetic price panel"
        );

        let names = self.stock_names();
        PricePanel::new(names.into_iter().zip(prices).collect())
    }
}
