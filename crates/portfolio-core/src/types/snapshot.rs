//! Plain-data read models handed to collaborators.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mark-to-market view of one open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Symbol
    pub symbol: String,
    /// Units held
    pub quantity: Decimal,
    /// Entry price
    pub entry_price: Decimal,
    /// Price the position was valued at
    pub current_price: Decimal,
    /// Mark-to-market profit/loss
    pub unrealized_pnl: Decimal,
    /// Mark-to-market profit/loss as a percentage of entry
    pub pnl_pct: Decimal,
}

/// Full portfolio state at a point in time.
///
/// Owned data only: sinks (telemetry exporters, time-series writers,
/// dashboards) cannot reach back into engine state through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Uninvested cash
    pub capital: Decimal,
    /// Number of open positions
    pub position_count: usize,
    /// Open positions keyed by symbol
    pub positions: HashMap<String, PositionSnapshot>,
    /// P&L booked on closed trades
    pub closed_pnl: Decimal,
    /// Mark-to-market P&L across open positions
    pub unrealized_pnl: Decimal,
    /// Closed plus unrealized P&L
    pub total_pnl: Decimal,
    /// Capital plus unrealized P&L
    pub total_value: Decimal,
    /// Return over initial capital, percent
    pub return_pct: Decimal,
    /// Positions opened since construction
    pub trade_count: usize,
    /// Closed trades with positive P&L
    pub win_count: usize,
    /// Closed trades with zero or negative P&L
    pub loss_count: usize,
}

/// Derived performance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Annualized Sharpe ratio of the closed-trade return series
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough decline of the equity curve, as a
    /// non-positive fraction
    pub max_drawdown: f64,
    /// Winning fraction of closed trades
    pub win_rate: f64,
    /// Positions opened since construction
    pub total_trades: usize,
    /// Mean P&L of winning trades
    pub avg_win: Decimal,
    /// Mean P&L of losing trades
    pub avg_loss: Decimal,
}

/// Portfolio state combined with performance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Portfolio state at summary time
    #[serde(flatten)]
    pub state: PortfolioSnapshot,
    /// Derived statistics
    pub performance: PerformanceStats,
}
