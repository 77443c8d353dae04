//! Risk parameters and the pre-open limit check.

use portfolio_core::{PortfolioError, PortfolioResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Result of a pre-open limit check.
#[derive(Debug, Clone)]
pub enum LimitCheck {
    /// Open allowed
    Allowed,
    /// Open blocked with reason
    Blocked { reason: String },
}

impl LimitCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, LimitCheck::Allowed)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, LimitCheck::Blocked { .. })
    }
}

/// Risk configuration, fixed at engine construction.
///
/// `max_position_size` and `max_total_exposure` are fractions of initial
/// capital, `stop_loss_pct` and `take_profit_pct` fractions of entry
/// price, `max_daily_loss` a fraction of the capital at the start of the
/// current day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskParams {
    /// Starting and reference capital
    pub initial_capital: Decimal,
    /// Fraction of initial capital allotted to any single new position
    pub max_position_size: Decimal,
    /// Fraction of initial capital that may be committed across all open
    /// positions at entry cost
    pub max_total_exposure: Decimal,
    /// Stop-loss offset below entry price
    pub stop_loss_pct: Decimal,
    /// Take-profit offset above entry price
    pub take_profit_pct: Decimal,
    /// Daily loss beyond which new opens are blocked
    pub max_daily_loss: Decimal,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            initial_capital: dec!(100000),
            max_position_size: dec!(0.1),  // 10% max per position
            max_total_exposure: dec!(0.8), // 80% max deployed
            stop_loss_pct: dec!(0.05),     // 5% stop loss
            take_profit_pct: dec!(0.15),   // 15% take profit
            max_daily_loss: dec!(0.03),    // 3% max daily drawdown
        }
    }
}

impl RiskParams {
    /// Validate the configuration. Fails closed: an engine is never
    /// constructed from invalid parameters.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.initial_capital <= Decimal::ZERO {
            return Err(PortfolioError::InvalidConfig(format!(
                "initial_capital must be positive, got {}",
                self.initial_capital
            )));
        }
        if self.max_position_size <= Decimal::ZERO || self.max_position_size > Decimal::ONE {
            return Err(PortfolioError::InvalidConfig(format!(
                "max_position_size must be in (0, 1], got {}",
                self.max_position_size
            )));
        }
        if self.max_total_exposure <= Decimal::ZERO || self.max_total_exposure > Decimal::ONE {
            return Err(PortfolioError::InvalidConfig(format!(
                "max_total_exposure must be in (0, 1], got {}",
                self.max_total_exposure
            )));
        }
        if self.stop_loss_pct <= Decimal::ZERO {
            return Err(PortfolioError::InvalidConfig(format!(
                "stop_loss_pct must be positive, got {}",
                self.stop_loss_pct
            )));
        }
        if self.take_profit_pct <= Decimal::ZERO {
            return Err(PortfolioError::InvalidConfig(format!(
                "take_profit_pct must be positive, got {}",
                self.take_profit_pct
            )));
        }
        if self.max_daily_loss <= Decimal::ZERO || self.max_daily_loss > Decimal::ONE {
            return Err(PortfolioError::InvalidConfig(format!(
                "max_daily_loss must be in (0, 1], got {}",
                self.max_daily_loss
            )));
        }
        Ok(())
    }

    /// Check whether a new position may be opened, given the day's P&L and
    /// the entry cost already committed across open positions.
    ///
    /// The daily-loss breach blocks new opens only; existing positions can
    /// still be closed or stopped out. Exposure is measured at entry cost
    /// against initial capital.
    pub fn check_new_open(
        &self,
        daily_pnl: Decimal,
        daily_start_capital: Decimal,
        current_exposure: Decimal,
    ) -> LimitCheck {
        let daily_loss_pct = if daily_start_capital > Decimal::ZERO {
            daily_pnl / daily_start_capital
        } else {
            Decimal::ZERO
        };
        if daily_loss_pct < -self.max_daily_loss {
            return LimitCheck::Blocked {
                reason: format!(
                    "daily loss limit hit: {:.2}% (limit {:.2}%)",
                    daily_loss_pct * dec!(100),
                    self.max_daily_loss * dec!(100)
                ),
            };
        }

        let exposure_pct = current_exposure / self.initial_capital;
        if exposure_pct > self.max_total_exposure {
            return LimitCheck::Blocked {
                reason: format!(
                    "max exposure limit hit: {:.2}% (limit {:.2}%)",
                    exposure_pct * dec!(100),
                    self.max_total_exposure * dec!(100)
                ),
            };
        }

        LimitCheck::Allowed
    }
}
