//! ACF/PACF correlogram computation with confidence bands.
//!
//! The correlogram is the primary diagnostic for temporal dependence: the
//! autocorrelation function (ACF) measures raw serial correlation at each
//! lag, while the partial autocorrelation function (PACF) measures the
//! correlation remaining after conditioning out the intermediate lags.

use crate::error::{AnalysisError, Result};
use crate::stats::mean;
use statrs::distribution::{ContinuousCDF, Normal};

/// Denominators below this are treated as numerically zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// Result of analyzing a series at a chosen maximum lag.
///
/// Coefficients are indexed by lag `0..=max_lag`; lag 0 is always 1.0.
/// The bounds are per-lag confidence band offsets around zero, so a
/// coefficient is significant at the correlogram's `alpha` whenever it
/// falls outside `[lower_bound[k], upper_bound[k]]`.
#[derive(Debug, Clone)]
pub struct Correlogram {
    /// Correlation coefficients, one per lag (lag 0 first).
    pub coefficients: Vec<f64>,
    /// Lower confidence band offset per lag.
    pub lower_bound: Vec<f64>,
    /// Upper confidence band offset per lag.
    pub upper_bound: Vec<f64>,
    /// Significance level the bands were computed at.
    pub alpha: f64,
}

impl Correlogram {
    /// Maximum lag covered by this correlogram.
    pub fn max_lag(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficients with lag 0 dropped.
    pub fn tail(&self) -> &[f64] {
        &self.coefficients[1..]
    }
}

/// PACF estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacfMethod {
    /// Durbin-Levinson recursion over the sample ACF.
    #[default]
    DurbinLevinson,
    /// Per-lag AR(k) least-squares fit; PACF(k) is the last coefficient.
    Ols,
}

/// Compute the autocorrelation function of a series.
///
/// Uses the full-sample (biased) denominator convention so coefficients
/// are comparable across lags. The confidence band at every lag beyond 0
/// is `± z(1 - alpha/2) / sqrt(n)`, the large-sample white-noise
/// approximation.
///
/// # Arguments
/// * `series` - Cleaned input series (no missing values)
/// * `max_lag` - Largest lag to compute; must satisfy `1 <= max_lag < n`
/// * `alpha` - Significance level for the bands, in (0, 1)
pub fn compute_acf(series: &[f64], max_lag: usize, alpha: f64) -> Result<Correlogram> {
    validate_params(series, max_lag, alpha)?;

    let coefficients = sample_acf(series, max_lag)?;
    Ok(with_bands(coefficients, series.len(), alpha))
}

/// Compute the partial autocorrelation function of a series.
///
/// PACF at lag `k` is the correlation between the series and its k-step
/// lagged value after linearly conditioning out lags `1..k`; equivalently
/// the last coefficient of a fitted AR(k). Lag 0 is included as a 1.0
/// placeholder so ACF and PACF correlograms line up.
///
/// # Arguments
/// * `series` - Cleaned input series
/// * `max_lag` - Largest lag to compute; must satisfy `1 <= max_lag < n`
/// * `alpha` - Significance level for the bands, in (0, 1)
/// * `method` - Estimation method (`PacfMethod::default()` is Durbin-Levinson)
pub fn compute_pacf(
    series: &[f64],
    max_lag: usize,
    alpha: f64,
    method: PacfMethod,
) -> Result<Correlogram> {
    validate_params(series, max_lag, alpha)?;

    let coefficients = match method {
        PacfMethod::DurbinLevinson => pacf_durbin_levinson(series, max_lag)?,
        PacfMethod::Ols => pacf_ols(series, max_lag)?,
    };

    Ok(with_bands(coefficients, series.len(), alpha))
}

fn validate_params(series: &[f64], max_lag: usize, alpha: f64) -> Result<()> {
    if series.is_empty() {
        return Err(AnalysisError::EmptyData);
    }
    if max_lag == 0 || max_lag >= series.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "max_lag must satisfy 1 <= max_lag < series length ({}), got {}",
            series.len(),
            max_lag
        )));
    }
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "alpha must lie strictly between 0 and 1, got {}",
            alpha
        )));
    }
    Ok(())
}

/// Attach the constant-width white-noise confidence band.
///
/// Lag 0 is trivially 1.0 and gets a zero-width band.
fn with_bands(coefficients: Vec<f64>, n: usize, alpha: f64) -> Correlogram {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let band = normal.inverse_cdf(1.0 - alpha / 2.0) / (n as f64).sqrt();

    let mut lower_bound = vec![-band; coefficients.len()];
    let mut upper_bound = vec![band; coefficients.len()];
    lower_bound[0] = 0.0;
    upper_bound[0] = 0.0;

    Correlogram {
        coefficients,
        lower_bound,
        upper_bound,
        alpha,
    }
}

/// Sample autocorrelations for lags `0..=max_lag`, biased denominator.
fn sample_acf(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let m = mean(series);
    let denominator: f64 = series.iter().map(|x| (x - m).powi(2)).sum();

    if denominator < SINGULARITY_EPS {
        return Err(AnalysisError::ComputationError(
            "series has zero variance".to_string(),
        ));
    }

    let mut acf = Vec::with_capacity(max_lag + 1);
    acf.push(1.0);
    for k in 1..=max_lag {
        let numerator: f64 = series
            .iter()
            .skip(k)
            .zip(series.iter())
            .map(|(&x, &x_lag)| (x - m) * (x_lag - m))
            .sum();
        acf.push(numerator / denominator);
    }

    Ok(acf)
}

/// PACF via a single Durbin-Levinson pass.
///
/// Runs the recursion once up to `max_lag`, collecting the reflection
/// coefficient `phi[k][k]` at every order along the way.
fn pacf_durbin_levinson(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let acf = sample_acf(series, max_lag)?;

    let mut pacf = Vec::with_capacity(max_lag + 1);
    pacf.push(1.0);

    // phi holds the AR coefficients of the current order.
    let mut phi = vec![0.0; max_lag + 1];
    let mut prev = vec![0.0; max_lag + 1];

    phi[1] = acf[1];
    pacf.push(acf[1]);

    for k in 2..=max_lag {
        prev[..k].copy_from_slice(&phi[..k]);

        let mut num = acf[k];
        let mut denom = 1.0;
        for j in 1..k {
            num -= prev[j] * acf[k - j];
            denom -= prev[j] * acf[j];
        }

        if denom.abs() < SINGULARITY_EPS {
            return Err(AnalysisError::ComputationError(format!(
                "Durbin-Levinson recursion singular at lag {}",
                k
            )));
        }

        let phi_kk = num / denom;
        for j in 1..k {
            phi[j] = prev[j] - phi_kk * prev[k - j];
        }
        phi[k] = phi_kk;
        pacf.push(phi_kk);
    }

    Ok(pacf)
}

/// PACF via per-lag least-squares autoregressions.
fn pacf_ols(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let m = mean(series);
    let denominator: f64 = series.iter().map(|x| (x - m).powi(2)).sum();
    if denominator < SINGULARITY_EPS {
        return Err(AnalysisError::ComputationError(
            "series has zero variance".to_string(),
        ));
    }

    let mut pacf = Vec::with_capacity(max_lag + 1);
    pacf.push(1.0);
    for k in 1..=max_lag {
        pacf.push(ar_last_coefficient(series, k)?);
    }
    Ok(pacf)
}

/// Last coefficient of an AR(k) fit with intercept.
///
/// Solves the normal equations `X'X beta = X'y` where the design matrix
/// columns are `[1, x[t-1], ..., x[t-k]]` over `t = k..n`.
fn ar_last_coefficient(series: &[f64], k: usize) -> Result<f64> {
    let n = series.len();
    let num_params = k + 1;

    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];

    for t in k..n {
        let y = series[t];
        // Row is [1, x[t-1], ..., x[t-k]].
        xtx[0][0] += 1.0;
        xty[0] += y;
        for i in 0..k {
            let xi = series[t - 1 - i];
            xtx[0][i + 1] += xi;
            xtx[i + 1][0] += xi;
            xty[i + 1] += xi * y;
            for j in 0..k {
                xtx[i + 1][j + 1] += xi * series[t - 1 - j];
            }
        }
    }

    // Small ridge for numerical stability.
    for i in 0..num_params {
        xtx[i][i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        AnalysisError::ComputationError(format!(
            "AR({}) normal equations not positive definite",
            k
        ))
    })?;

    Ok(beta[num_params - 1])
}

/// Solve a symmetric positive definite system via Cholesky decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Cholesky decomposition A = L @ L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None; // Not positive definite
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_trend(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    // ==================== compute_acf ====================

    #[test]
    fn acf_lag_0_is_one() {
        let series = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0];
        let result = compute_acf(&series, 3, 0.05).unwrap();
        assert_relative_eq!(result.coefficients[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn acf_length_is_max_lag_plus_one() {
        let series = linear_trend(50);
        let result = compute_acf(&series, 10, 0.05).unwrap();
        assert_eq!(result.coefficients.len(), 11);
        assert_eq!(result.lower_bound.len(), 11);
        assert_eq!(result.upper_bound.len(), 11);
    }

    #[test]
    fn acf_linear_trend_is_high_at_lag_1() {
        let series = linear_trend(20);
        let result = compute_acf(&series, 5, 0.05).unwrap();
        assert!(
            result.coefficients[1] > 0.8,
            "expected high ACF(1) for linear trend, got {}",
            result.coefficients[1]
        );
    }

    #[test]
    fn acf_alternating_is_negative_at_lag_1() {
        let series: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let result = compute_acf(&series, 3, 0.05).unwrap();
        assert!(
            result.coefficients[1] < -0.5,
            "expected negative ACF(1) for alternating series, got {}",
            result.coefficients[1]
        );
    }

    #[test]
    fn acf_bands_are_symmetric_and_constant() {
        let series = linear_trend(100);
        let result = compute_acf(&series, 10, 0.05).unwrap();

        // Lag 0 band is zero-width.
        assert_eq!(result.lower_bound[0], 0.0);
        assert_eq!(result.upper_bound[0], 0.0);

        // Beyond lag 0: constant width, 1.96/sqrt(100) at alpha = 0.05.
        let expected = 1.96 / 10.0;
        for k in 1..=10 {
            assert_relative_eq!(result.upper_bound[k], expected, epsilon = 1e-3);
            assert_relative_eq!(result.lower_bound[k], -expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn acf_band_width_depends_on_alpha() {
        let series = linear_trend(100);
        let narrow = compute_acf(&series, 5, 0.10).unwrap();
        let wide = compute_acf(&series, 5, 0.01).unwrap();
        assert!(wide.upper_bound[1] > narrow.upper_bound[1]);
    }

    #[test]
    fn acf_rejects_bad_max_lag() {
        let series = linear_trend(10);
        assert!(matches!(
            compute_acf(&series, 0, 0.05),
            Err(AnalysisError::InvalidParameter(_))
        ));
        assert!(matches!(
            compute_acf(&series, 10, 0.05),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn acf_rejects_bad_alpha() {
        let series = linear_trend(10);
        assert!(matches!(
            compute_acf(&series, 3, 0.0),
            Err(AnalysisError::InvalidParameter(_))
        ));
        assert!(matches!(
            compute_acf(&series, 3, 1.0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn acf_rejects_empty_series() {
        assert!(matches!(compute_acf(&[], 1, 0.05), Err(AnalysisError::EmptyData)));
    }

    #[test]
    fn acf_rejects_constant_series() {
        let series = vec![5.0; 20];
        assert!(matches!(
            compute_acf(&series, 3, 0.05),
            Err(AnalysisError::ComputationError(_))
        ));
    }

    // ==================== compute_pacf ====================

    #[test]
    fn pacf_lag_0_placeholder_is_one() {
        let series = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0];
        let result = compute_pacf(&series, 3, 0.05, PacfMethod::default()).unwrap();
        assert_relative_eq!(result.coefficients[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn pacf_lag_1_equals_acf_lag_1() {
        let series = linear_trend(50);
        let acf = compute_acf(&series, 5, 0.05).unwrap();
        let pacf = compute_pacf(&series, 5, 0.05, PacfMethod::DurbinLevinson).unwrap();
        assert_relative_eq!(pacf.coefficients[1], acf.coefficients[1], epsilon = 1e-10);
    }

    #[test]
    fn pacf_ar1_process_cuts_after_lag_1() {
        // x[t] = 0.8 * x[t-1], deterministic AR(1) decay.
        let mut series = vec![0.0; 100];
        series[0] = 1.0;
        for i in 1..100 {
            series[i] = 0.8 * series[i - 1];
        }

        let result = compute_pacf(&series, 5, 0.05, PacfMethod::DurbinLevinson).unwrap();
        assert!(
            result.coefficients[1] > 0.5,
            "expected high PACF(1) for AR(1), got {}",
            result.coefficients[1]
        );
        assert!(
            result.coefficients[2].abs() < result.coefficients[1].abs(),
            "PACF(2) should be smaller than PACF(1)"
        );
    }

    #[test]
    fn pacf_ols_agrees_with_durbin_levinson_at_lag_1() {
        let series: Vec<f64> = (0..80)
            .map(|i| ((i * 17 + 13) % 97) as f64 / 50.0 - 1.0)
            .collect();

        let dl = compute_pacf(&series, 8, 0.05, PacfMethod::DurbinLevinson).unwrap();
        let ols = compute_pacf(&series, 8, 0.05, PacfMethod::Ols).unwrap();

        // The two estimators differ in finite samples but track each other.
        assert_relative_eq!(dl.coefficients[1], ols.coefficients[1], epsilon = 0.1);
    }

    #[test]
    fn pacf_rejects_constant_series() {
        let series = vec![2.5; 30];
        assert!(matches!(
            compute_pacf(&series, 4, 0.05, PacfMethod::DurbinLevinson),
            Err(AnalysisError::ComputationError(_))
        ));
        assert!(matches!(
            compute_pacf(&series, 4, 0.05, PacfMethod::Ols),
            Err(AnalysisError::ComputationError(_))
        ));
    }

    #[test]
    fn pacf_length_matches_acf_length() {
        let series = linear_trend(60);
        let acf = compute_acf(&series, 12, 0.05).unwrap();
        let pacf = compute_pacf(&series, 12, 0.05, PacfMethod::default()).unwrap();
        assert_eq!(acf.coefficients.len(), pacf.coefficients.len());
        assert_eq!(pacf.max_lag(), 12);
    }

    // ==================== solve_symmetric ====================

    #[test]
    fn solve_symmetric_identity() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let b = vec![3.0, 4.0];
        let x = solve_symmetric(&a, &b).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 4.0, epsilon = 1e-10);
    }

    #[test]
    fn solve_symmetric_rejects_indefinite() {
        let a = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        let b = vec![1.0, 1.0];
        assert!(solve_symmetric(&a, &b).is_none());
    }
}
