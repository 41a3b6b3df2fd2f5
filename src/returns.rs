//! Strategy return calculation.
//!
//! Converts a position series plus the underlying price series into
//! daily and cumulative strategy returns. The realized return at step t
//! uses the position established at t−1 applied to the price move from
//! t−1 to t.

/// Running compounding product of a daily return series, minus one.
pub fn compound(daily: &[f64]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(daily.len());
    let mut product = 1.0;
    for ret in daily {
        product *= 1.0 + ret;
        cumulative.push(product - 1.0);
    }
    cumulative
}

/// Daily and cumulative returns for one pair.
///
/// `daily[0]` is 0 by convention (no prior price); for t ≥ 1,
/// `daily[t] = position_x[t−1]·return_x[t] + position_y[t−1]·return_y[t]`
/// with per-leg simple returns from consecutive price ratios.
pub fn calculate_returns(
    price_x: &[f64],
    price_y: &[f64],
    position_x: &[f64],
    position_y: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let n = price_x.len();
    let mut daily = vec![0.0; n];

    for t in 1..n {
        let return_x = (price_x[t] - price_x[t - 1]) / price_x[t - 1];
        let return_y = (price_y[t] - price_y[t - 1]) / price_y[t - 1];
        daily[t] = position_x[t - 1] * return_x + position_y[t - 1] * return_y;
    }

    let cumulative = compound(&daily);
    (daily, cumulative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_return_is_zero() {
        let prices = vec![100.0, 110.0, 99.0];
        let positions = vec![1.0, 1.0, 1.0];
        let (daily, _) = calculate_returns(&prices, &prices, &positions, &positions);
        assert_eq!(daily[0], 0.0);
    }

    #[test]
    fn test_position_applies_to_next_day_move() {
        // Long leg x only from t=1; the +10% move from t=1 to t=2 is
        // captured, the earlier move is not.
        let price_x = vec![100.0, 100.0, 110.0];
        let price_y = vec![50.0, 50.0, 50.0];
        let position_x = vec![0.0, 1.0, 1.0];
        let position_y = vec![0.0, 0.0, 0.0];
        let (daily, _) = calculate_returns(&price_x, &price_y, &position_x, &position_y);
        assert_eq!(daily[1], 0.0);
        assert!((daily[2] - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_both_legs_contribute() {
        let price_x = vec![100.0, 110.0];
        let price_y = vec![100.0, 90.0];
        let position_x = vec![1.0, 1.0];
        let position_y = vec![-0.5, -0.5];
        let (daily, _) = calculate_returns(&price_x, &price_y, &position_x, &position_y);
        // 1.0 * 10% + (-0.5) * (-10%) = 15%
        assert!((daily[1] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_is_compounding_product() {
        let daily = vec![0.0, 0.1, -0.05, 0.02];
        let cumulative = compound(&daily);
        let mut product = 1.0;
        for (t, ret) in daily.iter().enumerate() {
            product *= 1.0 + ret;
            assert!((cumulative[t] - (product - 1.0)).abs() < 1e-12);
        }
    }
}
