//! Ljung-Box white-noise test.
//!
//! Runs the portmanteau test at every lag up to a caller-chosen bound and
//! reports the full per-lag statistic and p-value vectors; the series is
//! judged white noise only when every lag fails to reject independence.

use crate::error::{AnalysisError, Result};
use crate::stats::mean;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Outcome of the white-noise test.
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteNoiseVerdict {
    /// Ljung-Box Q statistic per lag, for lags `1..=lags`.
    pub statistics: Vec<f64>,
    /// Chi-squared p-value per lag (df equals the lag).
    pub p_values: Vec<f64>,
    /// Number of lags tested.
    pub lags: usize,
    /// Whether every per-lag p-value exceeds 0.05.
    pub is_white_noise: bool,
    /// Human-readable verdict.
    pub interpretation: String,
}

/// Ljung-Box test for serial correlation.
///
/// Null hypothesis: the series values are independently distributed. The
/// Q statistic at lag `m` accumulates the first `m` squared sample
/// autocorrelations with the small-sample `(n - k)` correction and is
/// referred to a chi-squared distribution with `m` degrees of freedom.
///
/// # Arguments
/// * `series` - Time series data
/// * `lags` - Number of lags to test; must satisfy `1 <= lags < n`
pub fn test_white_noise(series: &[f64], lags: usize) -> Result<WhiteNoiseVerdict> {
    let n = series.len();
    if n < 3 {
        return Err(AnalysisError::InsufficientData { needed: 3, got: n });
    }
    if lags == 0 || lags >= n {
        return Err(AnalysisError::InvalidParameter(format!(
            "lags must satisfy 1 <= lags < series length ({}), got {}",
            n, lags
        )));
    }

    let m = mean(series);
    let centered: Vec<f64> = series.iter().map(|&x| x - m).collect();
    let var: f64 = centered.iter().map(|&x| x * x).sum::<f64>();

    // A constant series carries no serial correlation to reject.
    if var == 0.0 {
        return Ok(verdict(vec![0.0; lags], vec![1.0; lags], lags));
    }

    let mut statistics = Vec::with_capacity(lags);
    let mut p_values = Vec::with_capacity(lags);
    let mut q_sum = 0.0;

    for k in 1..=lags {
        let acf_k: f64 = centered
            .iter()
            .skip(k)
            .zip(centered.iter())
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / var;

        q_sum += (acf_k * acf_k) / (n - k) as f64;
        let q = q_sum * n as f64 * (n + 2) as f64;

        let chi_sq = ChiSquared::new(k as f64).unwrap();
        let p_value = (1.0 - chi_sq.cdf(q)).clamp(0.0, 1.0);

        statistics.push(q);
        p_values.push(p_value);
    }

    Ok(verdict(statistics, p_values, lags))
}

fn verdict(statistics: Vec<f64>, p_values: Vec<f64>, lags: usize) -> WhiteNoiseVerdict {
    let is_white_noise = p_values.iter().all(|&p| p > 0.05);
    let interpretation = if is_white_noise {
        "white noise".to_string()
    } else {
        "not white noise".to_string()
    };

    WhiteNoiseVerdict {
        statistics,
        p_values,
        lags,
        is_white_noise,
        interpretation,
    }
}
