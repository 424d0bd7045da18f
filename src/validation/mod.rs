//! Statistical validation tests for modeling assumptions.
//!
//! Provides stationarity hypothesis tests and a white-noise test, run on
//! the same cleaned series the correlogram engine analyzes.
//!
//! # Example
//!
//! ```
//! use tsdiag::validation::{test_stationarity, test_white_noise};
//!
//! let series: Vec<f64> = (0..50).map(|i| ((i * 17 + 13) % 97) as f64 / 50.0 - 1.0).collect();
//!
//! // ADF and KPSS run independently; either side may fail on its own.
//! let report = test_stationarity(&series);
//! if let Ok(adf) = &report.adf {
//!     println!("ADF: {} (p = {:.3})", adf.interpretation, adf.p_value);
//! }
//!
//! // One Ljung-Box p-value per lag.
//! let verdict = test_white_noise(&series, 10).unwrap();
//! println!("{}", verdict.interpretation);
//! ```

pub mod stationarity;
pub mod white_noise;

pub use stationarity::{
    adf_test, kpss_test, test_stationarity, CriticalValues, StationarityReport,
    StationarityVerdict,
};

pub use white_noise::{test_white_noise, WhiteNoiseVerdict};
