//! Stationarity hypothesis tests.
//!
//! Two tests with deliberately opposite null hypotheses are provided: the
//! augmented Dickey-Fuller test (null: unit root, i.e. non-stationary) and
//! the KPSS test (null: stationary). They are reported side by side and
//! never merged, so a caller can see when they disagree.

use crate::error::{AnalysisError, Result};
use crate::stats::mean;

/// Minimum observations required by either test.
const MIN_OBSERVATIONS: usize = 4;

/// Critical values at common significance levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriticalValues {
    /// Critical value at 1% significance
    pub cv_1pct: f64,
    /// Critical value at 5% significance
    pub cv_5pct: f64,
    /// Critical value at 10% significance
    pub cv_10pct: f64,
}

/// Outcome of a single stationarity hypothesis test.
#[derive(Debug, Clone, PartialEq)]
pub struct StationarityVerdict {
    /// Test statistic
    pub statistic: f64,
    /// P-value (approximate)
    pub p_value: f64,
    /// Number of lags used
    pub lags: usize,
    /// Critical values for the statistic
    pub critical_values: CriticalValues,
    /// Whether the series appears stationary under this test's convention
    pub is_stationary: bool,
    /// Human-readable verdict
    pub interpretation: String,
}

/// Paired report from both tests.
///
/// A failure on one side (short or degenerate series) is captured as data
/// and does not prevent the other side from completing.
#[derive(Debug, Clone, PartialEq)]
pub struct StationarityReport {
    /// ADF verdict, or the error that prevented it.
    pub adf: Result<StationarityVerdict>,
    /// KPSS verdict, or the error that prevented it.
    pub kpss: Result<StationarityVerdict>,
}

/// Augmented Dickey-Fuller test for a unit root.
///
/// Null hypothesis: the series has a unit root (non-stationary). A small
/// p-value rejects the null; the series is declared stationary when
/// `p_value < 0.05`.
///
/// # Arguments
/// * `series` - Time series data
/// * `max_lags` - Maximum augmentation lags (default: `(n-1)^(1/3)`)
pub fn adf_test(series: &[f64], max_lags: Option<usize>) -> Result<StationarityVerdict> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_OBSERVATIONS,
            got: n,
        });
    }

    // Default lag selection: (n-1)^(1/3)
    let max_lags = max_lags.unwrap_or_else(|| ((n - 1) as f64).powf(1.0 / 3.0).floor() as usize);
    let max_lags = max_lags.min(n / 2 - 1).max(1);

    // First difference
    let diff: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    // Select augmentation order by AIC
    let best_lag = select_lag_aic(&diff, &series[..n - 1], max_lags);

    // DF regression: delta_y_t = alpha + beta * y_{t-1} + e_t
    let (beta, se) = dickey_fuller_regression(&diff, &series[..n - 1], best_lag).ok_or_else(
        || AnalysisError::ComputationError("degenerate Dickey-Fuller regression".to_string()),
    )?;

    if se == 0.0 || se.is_nan() {
        return Err(AnalysisError::ComputationError(
            "zero standard error in Dickey-Fuller regression".to_string(),
        ));
    }

    let t_stat = beta / se;

    // MacKinnon critical values for a regression with constant, no trend.
    let critical_values = CriticalValues {
        cv_1pct: -3.43,
        cv_5pct: -2.86,
        cv_10pct: -2.57,
    };

    let p_value = adf_p_value(t_stat);

    // Reject the unit-root null: stationary.
    let is_stationary = p_value < 0.05;

    Ok(StationarityVerdict {
        statistic: t_stat,
        p_value,
        lags: best_lag,
        critical_values,
        is_stationary,
        interpretation: interpret(is_stationary),
    })
}

/// KPSS test for level stationarity.
///
/// Null hypothesis: the series is stationary. A small p-value rejects the
/// null; the series is declared non-stationary when `p_value <= 0.05`.
///
/// # Arguments
/// * `series` - Time series data
/// * `lags` - Bartlett-kernel lags for the HAC variance (default: `4*(n/100)^0.25`)
pub fn kpss_test(series: &[f64], lags: Option<usize>) -> Result<StationarityVerdict> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(AnalysisError::InsufficientData {
            needed: MIN_OBSERVATIONS,
            got: n,
        });
    }

    // Default bandwidth: 4 * (n/100)^0.25
    let lags = lags.unwrap_or_else(|| (4.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize);
    let lags = lags.min(n / 2).max(1);

    // Demean (level stationarity) and cumulate the residuals.
    let m = mean(series);
    let residuals: Vec<f64> = series.iter().map(|&x| x - m).collect();

    let mut cumsum = vec![0.0; n];
    cumsum[0] = residuals[0];
    for i in 1..n {
        cumsum[i] = cumsum[i - 1] + residuals[i];
    }

    let numerator: f64 = cumsum.iter().map(|&s| s * s).sum::<f64>() / (n * n) as f64;

    // Long-run variance via the Bartlett kernel.
    let mut variance = residuals.iter().map(|&r| r * r).sum::<f64>() / n as f64;
    for j in 1..=lags {
        let weight = 1.0 - j as f64 / (lags + 1) as f64;
        let autocovar: f64 = residuals
            .iter()
            .skip(j)
            .zip(residuals.iter())
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / n as f64;
        variance += 2.0 * weight * autocovar;
    }

    if variance <= 0.0 {
        return Err(AnalysisError::ComputationError(
            "non-positive long-run variance in KPSS test".to_string(),
        ));
    }

    let statistic = numerator / variance;

    // Critical values for KPSS level stationarity.
    let critical_values = CriticalValues {
        cv_1pct: 0.739,
        cv_5pct: 0.463,
        cv_10pct: 0.347,
    };

    let p_value = kpss_p_value(statistic);

    // Reject the stationarity null only at p <= 0.05.
    let is_stationary = p_value > 0.05;

    Ok(StationarityVerdict {
        statistic,
        p_value,
        lags,
        critical_values,
        is_stationary,
        interpretation: interpret(is_stationary),
    })
}

/// Run ADF and KPSS independently on the same series.
///
/// Each side's failure is stored in the report rather than propagated, so
/// partial results are a normal, reportable outcome.
pub fn test_stationarity(series: &[f64]) -> StationarityReport {
    StationarityReport {
        adf: adf_test(series, None),
        kpss: kpss_test(series, None),
    }
}

fn interpret(is_stationary: bool) -> String {
    if is_stationary {
        "stationary".to_string()
    } else {
        "non-stationary".to_string()
    }
}

/// Select the augmentation order by AIC.
fn select_lag_aic(diff: &[f64], level: &[f64], max_lags: usize) -> usize {
    let mut best_lag = 1;
    let mut best_aic = f64::INFINITY;

    for lag in 1..=max_lags {
        let aic = compute_aic(diff, level, lag);
        if aic < best_aic {
            best_aic = aic;
            best_lag = lag;
        }
    }

    best_lag
}

/// AIC of the DF regression at a given augmentation order.
fn compute_aic(diff: &[f64], level: &[f64], lag: usize) -> f64 {
    let n = diff.len();
    if n <= lag + 1 {
        return f64::INFINITY;
    }

    let start = lag;
    let effective_n = n - start;
    if effective_n < 3 {
        return f64::INFINITY;
    }

    let rss = compute_rss(diff, level, lag);
    if rss <= 0.0 {
        return f64::INFINITY;
    }

    // AIC = n * ln(RSS/n) + 2k, k = intercept + level + lag coefficients
    let k = lag + 2;
    effective_n as f64 * (rss / effective_n as f64).ln() + 2.0 * k as f64
}

/// Residual sum of squares of the level regression over `diff[start..]`.
fn compute_rss(diff: &[f64], level: &[f64], lag: usize) -> f64 {
    let n = diff.len();
    let start = lag;

    if n <= start + 1 || level.len() <= start {
        return f64::INFINITY;
    }

    let effective_n = n - start;
    let y_mean: f64 = diff[start..].iter().sum::<f64>() / effective_n as f64;
    let x_mean: f64 = level[start..n].iter().sum::<f64>() / effective_n as f64;

    let mut xx = 0.0;
    let mut xy = 0.0;
    for i in start..n {
        let x = level[i] - x_mean;
        let y = diff[i] - y_mean;
        xx += x * x;
        xy += x * y;
    }

    if xx == 0.0 {
        return f64::INFINITY;
    }

    let beta = xy / xx;
    let alpha = y_mean - beta * x_mean;

    let mut rss = 0.0;
    for i in start..n {
        let predicted = alpha + beta * level[i];
        let residual = diff[i] - predicted;
        rss += residual * residual;
    }
    rss
}

/// Coefficient and standard error of `y_{t-1}` in the DF regression.
///
/// Returns `None` when the regression is degenerate (no level variation or
/// too few effective observations).
fn dickey_fuller_regression(diff: &[f64], level: &[f64], lag: usize) -> Option<(f64, f64)> {
    let n = diff.len();
    let start = lag;

    if n <= start + 2 || level.len() <= start {
        return None;
    }

    let effective_n = n - start;
    let y_mean: f64 = diff[start..].iter().sum::<f64>() / effective_n as f64;
    let x_mean: f64 = level[start..n].iter().sum::<f64>() / effective_n as f64;

    let mut xx = 0.0;
    let mut xy = 0.0;
    let mut yy = 0.0;
    for i in start..n {
        let x = level[i] - x_mean;
        let y = diff[i] - y_mean;
        xx += x * x;
        xy += x * y;
        yy += y * y;
    }

    if xx == 0.0 {
        return None;
    }

    let beta = xy / xx;
    let rss = yy - beta * xy;
    let sigma_sq = rss / (effective_n - 2) as f64;
    if sigma_sq <= 0.0 {
        return None;
    }

    let se_beta = (sigma_sq / xx).sqrt();
    Some((beta, se_beta))
}

/// Approximate ADF p-value from the t-statistic (MacKinnon-style table).
fn adf_p_value(t_stat: f64) -> f64 {
    if t_stat.is_nan() {
        return f64::NAN;
    }

    if t_stat < -4.0 {
        0.001
    } else if t_stat < -3.43 {
        // Below the 1% critical value.
        0.005
    } else if t_stat < -2.86 {
        // Below the 5% critical value.
        0.025
    } else if t_stat < -2.57 {
        // Below the 10% critical value.
        0.075
    } else if t_stat < -1.94 {
        0.20
    } else if t_stat < -1.62 {
        0.30
    } else if t_stat < -1.28 {
        0.40
    } else if t_stat < -0.84 {
        0.50
    } else if t_stat < 0.0 {
        0.70
    } else {
        0.90 + 0.05 * (1.0 - (-t_stat).exp())
    }
}

/// Approximate KPSS p-value by interpolating between critical values.
fn kpss_p_value(statistic: f64) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }

    if statistic < 0.347 {
        0.10 + 0.90 * (1.0 - statistic / 0.347)
    } else if statistic < 0.463 {
        0.05 + 0.05 * (0.463 - statistic) / (0.463 - 0.347)
    } else if statistic < 0.739 {
        0.01 + 0.04 * (0.739 - statistic) / (0.739 - 0.463)
    } else {
        0.01 * (1.0 - (statistic - 0.739).min(1.0))
    }
}
