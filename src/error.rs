//! Error types for the tsdiag library.

use thiserror::Error;

/// Result type alias for diagnostic operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during correlation analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input series is empty.
    #[error("empty input series")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value (lag count, significance level, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed input data (e.g., mismatched correlogram lengths).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Computation error (numerical degeneracy).
    #[error("computation error: {0}")]
    ComputationError(String),
}
