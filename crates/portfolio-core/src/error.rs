//! Error types for the portfolio engine.

use thiserror::Error;

/// Portfolio engine error.
///
/// Signal handling never fails at runtime: risk-limit breaches, duplicate
/// opens, and insufficient capital all surface as a no-op action, not an
/// error. Errors are reserved for the construction and configuration seams.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;
