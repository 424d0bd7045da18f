//! Rule-based ARIMA order advisory from ACF/PACF cutoff patterns.
//!
//! Applies the classical Box-Jenkins identification rules: a PACF that
//! cuts off while the ACF tails off points to an AR model, the mirror
//! pattern points to an MA model, and two tailing-off functions point to a
//! mixed ARMA model.

use crate::correlogram::Correlogram;
use crate::cutoff::find_cutoff;
use crate::error::{AnalysisError, Result};

/// Candidate model class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    AR,
    MA,
    ARMA,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::AR => write!(f, "AR"),
            ModelKind::MA => write!(f, "MA"),
            ModelKind::ARMA => write!(f, "ARMA"),
        }
    }
}

/// A single candidate model specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSuggestion {
    /// Model class.
    pub kind: ModelKind,
    /// Candidate (p, d, q) order. `d` is always 0 here; differencing is an
    /// external concern.
    pub order: (usize, usize, usize),
    /// Human-readable justification naming the triggering cutoff lag(s).
    pub explanation: String,
}

/// Advisory report: ordered candidate models plus the raw evidence.
#[derive(Debug, Clone)]
pub struct AdvisorReport {
    /// Candidate models in preference order; never empty.
    pub suggestions: Vec<ModelSuggestion>,
    /// Detected ACF cutoff lag, if any.
    pub acf_cutoff: Option<usize>,
    /// Detected PACF cutoff lag, if any.
    pub pacf_cutoff: Option<usize>,
    /// Significance threshold the cutoffs were judged against.
    pub threshold: f64,
}

/// Suggest candidate ARIMA orders from a pair of correlograms.
///
/// Derives an independent large-sample threshold `1.96 / sqrt(n)` (where
/// `n` counts the lag-0-excluded coefficients), locates the cutoff of each
/// function, and maps the cutoff pattern through the Box-Jenkins decision
/// table. `max_order` bounds the cutoff scan, so no suggested order can
/// exceed it.
///
/// # Arguments
/// * `acf` - ACF correlogram of the series
/// * `pacf` - PACF correlogram of the same series
/// * `max_order` - Largest model order worth considering (scan bound)
pub fn suggest(acf: &Correlogram, pacf: &Correlogram, max_order: usize) -> Result<AdvisorReport> {
    if max_order == 0 {
        return Err(AnalysisError::InvalidParameter(
            "max_order must be at least 1".to_string(),
        ));
    }
    validate_correlogram(acf, "ACF")?;
    validate_correlogram(pacf, "PACF")?;
    if acf.coefficients.len() != pacf.coefficients.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "ACF and PACF correlograms cover different lag counts ({} vs {})",
            acf.max_lag(),
            pacf.max_lag()
        )));
    }

    // Lag 0 is trivially significant and carries no information.
    let acf_values = acf.tail();
    let pacf_values = pacf.tail();

    // Independent 95%-style threshold over the scanned coefficients,
    // decoupled from the correlograms' own alpha.
    let threshold = 1.96 / (acf_values.len() as f64).sqrt();

    let acf_cutoff = find_cutoff(acf_values, threshold, max_order);
    let pacf_cutoff = find_cutoff(pacf_values, threshold, max_order);

    // Box-Jenkins decision table over the cutoff pattern.
    let mut suggestions = Vec::new();
    match (pacf_cutoff, acf_cutoff) {
        (Some(p), None) => suggestions.push(ModelSuggestion {
            kind: ModelKind::AR,
            order: (p, 0, 0),
            explanation: format!(
                "PACF cuts off at lag {} while the ACF tails off; suggests AR({})",
                p, p
            ),
        }),
        (None, Some(q)) => suggestions.push(ModelSuggestion {
            kind: ModelKind::MA,
            order: (0, 0, q),
            explanation: format!(
                "ACF cuts off at lag {} while the PACF tails off; suggests MA({})",
                q, q
            ),
        }),
        (None, None) => suggestions.push(ModelSuggestion {
            kind: ModelKind::ARMA,
            order: (1, 0, 1),
            explanation: "both ACF and PACF tail off; suggests ARMA(1,1)".to_string(),
        }),
        (Some(p), Some(q)) => suggestions.push(ModelSuggestion {
            kind: ModelKind::ARMA,
            order: (p, 0, q),
            explanation: format!(
                "PACF cuts off at lag {} and ACF at lag {}; suggests ARMA({},{})",
                p, q, p, q
            ),
        }),
    }

    // Defensive fallback: the match above always yields a suggestion, but a
    // report must never leave the caller without candidates.
    if suggestions.is_empty() {
        suggestions.extend(default_suggestions());
    }

    Ok(AdvisorReport {
        suggestions,
        acf_cutoff,
        pacf_cutoff,
        threshold,
    })
}

fn validate_correlogram(correlogram: &Correlogram, name: &str) -> Result<()> {
    let len = correlogram.coefficients.len();
    if correlogram.lower_bound.len() != len || correlogram.upper_bound.len() != len {
        return Err(AnalysisError::InvalidInput(format!(
            "{} correlogram has mismatched coefficient/bound lengths ({}, {}, {})",
            name,
            len,
            correlogram.lower_bound.len(),
            correlogram.upper_bound.len()
        )));
    }
    if len < 2 {
        return Err(AnalysisError::InvalidInput(format!(
            "{} correlogram has no coefficients beyond lag 0",
            name
        )));
    }
    Ok(())
}

fn default_suggestions() -> Vec<ModelSuggestion> {
    vec![
        ModelSuggestion {
            kind: ModelKind::AR,
            order: (1, 0, 0),
            explanation: "default suggestion: AR(1)".to_string(),
        },
        ModelSuggestion {
            kind: ModelKind::MA,
            order: (0, 0, 1),
            explanation: "default suggestion: MA(1)".to_string(),
        },
        ModelSuggestion {
            kind: ModelKind::ARMA,
            order: (1, 0, 1),
            explanation: "default suggestion: ARMA(1,1)".to_string(),
        },
    ]
}
