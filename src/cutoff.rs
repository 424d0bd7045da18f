//! Cutoff detection for correlation coefficient sequences.
//!
//! A sequence "cuts off" at the first lag where it drops inside the
//! significance band and stays there; a sequence that never does so within
//! the scan window is "tailing off".

/// Find the lag at which a coefficient sequence cuts off.
///
/// `coefficients` excludes lag 0, so index `i` holds the coefficient for
/// lag `i + 1`. Lags are scanned in increasing order up to
/// `min(len, max_scan)`. A candidate lag with `|coefficient| < threshold`
/// is confirmed only if the next up-to-2 coefficients are also below the
/// threshold, guarding against a single noise-driven dip. Near the end of
/// the sequence, where fewer than 3 points remain, the single below-threshold
/// point is accepted on its own so boundary cutoffs are not missed.
///
/// Returns the confirmed cutoff as a 1-based lag, or `None` if every
/// scanned window fails confirmation.
pub fn find_cutoff(coefficients: &[f64], threshold: f64, max_scan: usize) -> Option<usize> {
    let scan = coefficients.len().min(max_scan);

    for i in 0..scan {
        if coefficients[i].abs() >= threshold {
            continue;
        }

        // Fewer than two points follow: single-point confirmation.
        if i + 2 >= coefficients.len() {
            return Some(i + 1);
        }

        let window_end = (i + 3).min(coefficients.len());
        if coefficients[i..window_end].iter().all(|c| c.abs() < threshold) {
            return Some(i + 1);
        }
    }

    None
}
