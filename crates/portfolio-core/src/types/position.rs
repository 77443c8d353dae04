//! Open position with attached exit levels.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One open, long-only holding in a single symbol.
///
/// Exit levels are fixed at entry: `stop_loss < entry_price < take_profit`
/// holds for any positive percentage offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Number of units held (always positive)
    pub quantity: Decimal,
    /// Price at which the position was opened
    pub entry_price: Decimal,
    /// When the position was opened
    pub entry_time: DateTime<Utc>,
    /// Force-close at or below this price
    pub stop_loss: Decimal,
    /// Force-close at or above this price
    pub take_profit: Decimal,
}

impl Position {
    /// Open a position, deriving the exit levels from the entry price.
    pub fn open(
        symbol: impl Into<String>,
        quantity: Decimal,
        entry_price: Decimal,
        entry_time: DateTime<Utc>,
        stop_loss_pct: Decimal,
        take_profit_pct: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            entry_price,
            entry_time,
            stop_loss: entry_price * (Decimal::ONE - stop_loss_pct),
            take_profit: entry_price * (Decimal::ONE + take_profit_pct),
        }
    }

    /// Entry cost of the position (quantity * entry price).
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.entry_price
    }

    /// Mark-to-market profit/loss at the given price.
    pub fn unrealized_pnl(&self, current_price: Decimal) -> Decimal {
        self.quantity * (current_price - self.entry_price)
    }

    /// Mark-to-market profit/loss as a percentage of the entry price.
    pub fn pnl_pct(&self, current_price: Decimal) -> Decimal {
        (current_price - self.entry_price) / self.entry_price * Decimal::from(100)
    }

    /// Check if the stop-loss level is triggered at the given price.
    pub fn stop_loss_hit(&self, current_price: Decimal) -> bool {
        current_price <= self.stop_loss
    }

    /// Check if the take-profit level is triggered at the given price.
    pub fn take_profit_hit(&self, current_price: Decimal) -> bool {
        current_price >= self.take_profit
    }
}
