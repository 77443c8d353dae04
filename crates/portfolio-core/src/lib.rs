//! Core types for the portfolio risk engine.
//!
//! This crate provides the foundational building blocks including:
//! - Trading signals and the actions the engine takes on them
//! - Open positions with attached stop-loss/take-profit levels
//! - Plain-data snapshots consumed by telemetry and reporting sinks

pub mod types;
pub mod error;

pub use error::{PortfolioError, PortfolioResult};
pub use types::*;
