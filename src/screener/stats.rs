//! Regression and stationarity statistics for pair screening.
//!
//! Implements the building blocks of the Engle-Granger two-step test:
//! OLS regression, the ADF t-statistic on residuals, a MacKinnon
//! p-value approximation, and AR(1) half-life estimation.

/// Minimum observations for a reliable ADF test
const MIN_ADF_SAMPLES: usize = 20;

/// Approximate p-value anchors for the residual ADF t-statistic
/// (test regression with a constant term). The 1%/2.5%/5%/10% points
/// are the MacKinnon asymptotic critical values; the remaining anchors
/// are coarse quantiles of the Dickey-Fuller distribution that only pin
/// the interpolation outside the decision region.
const MACKINNON_TABLE: &[(f64, f64)] = &[
    (-4.00, 0.001),
    (-3.43, 0.01),
    (-3.12, 0.025),
    (-2.86, 0.05),
    (-2.57, 0.10),
    (-2.20, 0.25),
    (-1.57, 0.50),
    (-0.44, 0.90),
    (-0.07, 0.95),
];

const P_VALUE_FLOOR: f64 = 1e-4;
const P_VALUE_CEIL: f64 = 0.99;

/// Ordinary least squares of `y` on `x` with an intercept.
///
/// Returns `(slope, intercept)`, or `None` when there are fewer than two
/// observations or `x` has zero variance.
pub fn ols(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        covariance += dx * (yi - mean_y);
        variance_x += dx * dx;
    }

    if variance_x == 0.0 {
        return None;
    }

    let slope = covariance / variance_x;
    let intercept = mean_y - slope * mean_x;

    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}

/// ADF t-statistic for a series (no lag augmentation, demeaned
/// regression).
///
/// Tests Δy[t] = γ·y[t−1] + ε and returns the t-statistic of γ; more
/// negative means more stationary. Degenerate inputs (too short, zero
/// variance) return 0.0, which maps to an insignificant p-value.
pub fn adf_statistic(series: &[f64]) -> f64 {
    if series.len() < MIN_ADF_SAMPLES {
        return 0.0;
    }

    let n = series.len() - 1;
    let n_f64 = n as f64;

    let mut delta_y: Vec<f64> = Vec::with_capacity(n);
    let mut y_lag: Vec<f64> = Vec::with_capacity(n);
    for i in 1..series.len() {
        delta_y.push(series[i] - series[i - 1]);
        y_lag.push(series[i - 1]);
    }

    // Demeaning is equivalent to including a constant in the regression
    let y_lag_mean = y_lag.iter().sum::<f64>() / n_f64;
    let delta_y_mean = delta_y.iter().sum::<f64>() / n_f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let y_centered = y_lag[i] - y_lag_mean;
        numerator += y_centered * (delta_y[i] - delta_y_mean);
        denominator += y_centered * y_centered;
    }

    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }

    let gamma = numerator / denominator;

    let mut sse = 0.0;
    for i in 0..n {
        let predicted = gamma * (y_lag[i] - y_lag_mean) + delta_y_mean;
        let residual = delta_y[i] - predicted;
        sse += residual * residual;
    }

    let mse = sse / (n_f64 - 1.0);
    let se_gamma = (mse / denominator).sqrt();

    if se_gamma.abs() < f64::EPSILON {
        return 0.0;
    }

    gamma / se_gamma
}

/// Map an ADF statistic to an approximate p-value by piecewise-linear
/// interpolation of [`MACKINNON_TABLE`], clamped to [1e-4, 0.99].
pub fn mackinnon_pvalue(statistic: f64) -> f64 {
    let (first_stat, _) = MACKINNON_TABLE[0];
    if statistic <= first_stat {
        return P_VALUE_FLOOR;
    }

    for window in MACKINNON_TABLE.windows(2) {
        let (lo_stat, lo_p) = window[0];
        let (hi_stat, hi_p) = window[1];
        if statistic <= hi_stat {
            let fraction = (statistic - lo_stat) / (hi_stat - lo_stat);
            return (lo_p + fraction * (hi_p - lo_p)).clamp(P_VALUE_FLOOR, P_VALUE_CEIL);
        }
    }

    P_VALUE_CEIL
}

/// Engle-Granger two-step cointegration test of `y` against `x`.
///
/// Step one regresses `y` on `x` (with intercept); step two applies the
/// ADF test to the regression residuals. Returns `(p_value, hedge_ratio)`
/// where the hedge ratio is the step-one slope, or `None` when the
/// regression is degenerate.
pub fn engle_granger(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let (slope, intercept) = ols(x, y)?;

    let residuals: Vec<f64> = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| yi - intercept - slope * xi)
        .collect();

    let statistic = adf_statistic(&residuals);
    Some((mackinnon_pvalue(statistic), slope))
}

/// Half-life of mean reversion for a spread series, in time-steps.
///
/// Fits Δs[t] = γ·s[t−1] + ε (with intercept) and converts the AR
/// coefficient: γ in (−1, 0) gives −ln(2)/ln(1+γ); γ ≥ 0 means the
/// series is not mean-reverting and the half-life is infinite; γ ≤ −1
/// overshoots within a single step and is treated as 0.
pub fn half_life(spread: &[f64]) -> f64 {
    if spread.len() < 3 {
        return f64::INFINITY;
    }

    let lag = &spread[..spread.len() - 1];
    let delta: Vec<f64> = spread.windows(2).map(|w| w[1] - w[0]).collect();

    let Some((gamma, _)) = ols(lag, &delta) else {
        return f64::INFINITY;
    };

    if gamma >= 0.0 {
        f64::INFINITY
    } else if gamma <= -1.0 {
        0.0
    } else {
        -(2.0f64.ln()) / (1.0 + gamma).ln()
    }
}
