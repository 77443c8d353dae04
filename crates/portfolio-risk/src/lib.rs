//! Signal-driven portfolio risk engine.
//!
//! Turns trading signals into position changes under hard risk limits,
//! tracks realized and unrealized P&L, and derives performance statistics
//! (win rate, Sharpe ratio, maximum drawdown). The engine performs no I/O
//! and spawns no background work; an external driver feeds it
//! (symbol, signal, price) tuples and reads state snapshots.

mod limits;
mod manager;
mod statistics;

pub use limits::{LimitCheck, RiskParams};
pub use manager::PortfolioManager;
pub use statistics::{
    average_loss, average_win, max_drawdown, sharpe_ratio, win_rate, DEFAULT_RISK_FREE_RATE,
};
