//! # tsdiag
//!
//! Correlation diagnostics for univariate time series.
//!
//! Given a cleaned, uniformly-spaced series, the crate computes ACF and
//! PACF correlograms with confidence bands, detects the lag at which each
//! function cuts off, maps the cutoff pattern to candidate ARIMA orders
//! via the classical Box-Jenkins rules, and validates the modeling
//! assumptions with ADF/KPSS stationarity tests and a Ljung-Box
//! white-noise test.
//!
//! Data ingestion, cleaning, differencing, and model fitting are external
//! concerns; every entry point here is a pure function over a borrowed
//! `&[f64]` series.

#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod advisor;
pub mod correlogram;
pub mod cutoff;
pub mod error;
pub mod stats;
pub mod validation;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::advisor::{suggest, AdvisorReport, ModelKind, ModelSuggestion};
    pub use crate::correlogram::{compute_acf, compute_pacf, Correlogram, PacfMethod};
    pub use crate::cutoff::find_cutoff;
    pub use crate::error::{AnalysisError, Result};
    pub use crate::validation::{
        test_stationarity, test_white_noise, StationarityReport, StationarityVerdict,
        WhiteNoiseVerdict,
    };
}
