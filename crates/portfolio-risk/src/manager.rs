//! Portfolio manager: the signal-processing risk engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use portfolio_core::types::{
    Action, CloseReason, PerformanceStats, PerformanceSummary, PortfolioSnapshot, Position,
    PositionSnapshot, Signal,
};
use portfolio_core::PortfolioResult;

use crate::limits::{LimitCheck, RiskParams};
use crate::statistics;

/// Mutable portfolio state. Guarded by the manager's lock: every public
/// operation holds it for its full duration, so a read never observes a
/// partially applied open or close.
#[derive(Debug)]
struct PortfolioState {
    capital: Decimal,
    positions: HashMap<String, Position>,
    closed_pnl: Decimal,
    daily_pnl: Decimal,
    daily_start_capital: Decimal,
    trade_count: usize,
    win_count: usize,
    loss_count: usize,
    pnl_history: Vec<Decimal>,
    equity_curve: Vec<Decimal>,
}

impl PortfolioState {
    fn new(initial_capital: Decimal) -> Self {
        Self {
            capital: initial_capital,
            positions: HashMap::new(),
            closed_pnl: Decimal::ZERO,
            daily_pnl: Decimal::ZERO,
            daily_start_capital: initial_capital,
            trade_count: 0,
            win_count: 0,
            loss_count: 0,
            pnl_history: Vec::new(),
            equity_curve: vec![initial_capital],
        }
    }

    /// Entry cost committed across all open positions.
    fn exposure(&self) -> Decimal {
        self.positions.values().map(|pos| pos.cost_basis()).sum()
    }

    /// Positions without a supplied price are valued at their entry price.
    fn unrealized_pnl(&self, current_prices: &HashMap<String, Decimal>) -> Decimal {
        self.positions
            .values()
            .map(|pos| pos.unrealized_pnl(*current_prices.get(&pos.symbol).unwrap_or(&pos.entry_price)))
            .sum()
    }

    fn total_value(&self, current_prices: &HashMap<String, Decimal>) -> Decimal {
        self.capital + self.unrealized_pnl(current_prices)
    }
}

/// The portfolio risk engine.
///
/// Owns all portfolio state and serializes every mutation through a single
/// exclusive lock. Clones share the same portfolio, so a signal-processing
/// loop and a periodic reporting task can each hold a handle.
#[derive(Debug, Clone)]
pub struct PortfolioManager {
    params: RiskParams,
    state: Arc<Mutex<PortfolioState>>,
}

impl PortfolioManager {
    /// Create an engine with the given risk parameters.
    ///
    /// Fails closed on an invalid configuration.
    pub fn new(params: RiskParams) -> PortfolioResult<Self> {
        params.validate()?;
        let state = PortfolioState::new(params.initial_capital);
        info!("Portfolio initialized with ${}", params.initial_capital);
        Ok(Self {
            params,
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// The risk parameters this engine was constructed with.
    pub fn params(&self) -> &RiskParams {
        &self.params
    }

    /// Process a trading signal for a symbol at the current price.
    ///
    /// Exit levels on an existing position take priority over the incoming
    /// signal: a price at or below the stop-loss force-closes the position
    /// regardless of what was requested, then a price at or above the
    /// take-profit. Only then is the signal dispatched. Returns the action
    /// actually taken, which is [`Action::None`] for holds and for opens
    /// rejected by risk limits, duplicate-open, or insufficient capital.
    pub fn process_signal(&self, symbol: &str, signal: Signal, current_price: Decimal) -> Action {
        self.process_signal_at(symbol, signal, current_price, Utc::now())
    }

    /// [`process_signal`](Self::process_signal) with an explicit timestamp
    /// for the entry time of a newly opened position.
    pub fn process_signal_at(
        &self,
        symbol: &str,
        signal: Signal,
        current_price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Action {
        if symbol.is_empty() || current_price <= Decimal::ZERO {
            warn!(
                "Ignoring {} for {:?}: invalid symbol or price {}",
                signal, symbol, current_price
            );
            return Action::None;
        }

        let mut state = self.state.lock().unwrap();

        // Exit checks come before signal dispatch, stop-loss first.
        if let Some(position) = state.positions.get(symbol) {
            if position.stop_loss_hit(current_price) {
                return self.close_position(&mut state, symbol, current_price, CloseReason::StopLoss);
            }
            if position.take_profit_hit(current_price) {
                return self.close_position(
                    &mut state,
                    symbol,
                    current_price,
                    CloseReason::TakeProfit,
                );
            }
        }

        match signal {
            Signal::Buy => self.open_position(&mut state, symbol, current_price, timestamp),
            Signal::Sell => self.close_position(&mut state, symbol, current_price, CloseReason::Signal),
            Signal::Hold => Action::None,
        }
    }

    fn open_position(
        &self,
        state: &mut PortfolioState,
        symbol: &str,
        current_price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Action {
        // At most one position per symbol.
        if state.positions.contains_key(symbol) {
            return Action::None;
        }

        let check = self.params.check_new_open(
            state.daily_pnl,
            state.daily_start_capital,
            state.exposure(),
        );
        if let LimitCheck::Blocked { reason } = check {
            warn!("Rejecting open for {}: {}", symbol, reason);
            return Action::None;
        }

        let budget = self.params.initial_capital * self.params.max_position_size;
        let quantity = (budget / current_price).floor().max(Decimal::ONE);
        let cost = quantity * current_price;

        // No partial fills.
        if cost > state.capital {
            debug!(
                "Insufficient capital for {}: need ${}, have ${}",
                symbol, cost, state.capital
            );
            return Action::None;
        }

        let position = Position::open(
            symbol,
            quantity,
            current_price,
            timestamp,
            self.params.stop_loss_pct,
            self.params.take_profit_pct,
        );

        info!(
            "OPEN {}: {} @ ${} | SL: ${} | TP: ${} | Capital remaining: ${}",
            symbol,
            quantity,
            current_price,
            position.stop_loss,
            position.take_profit,
            state.capital - cost
        );

        state.positions.insert(symbol.to_string(), position);
        state.capital -= cost;
        state.trade_count += 1;

        Action::Buy
    }

    fn close_position(
        &self,
        state: &mut PortfolioState,
        symbol: &str,
        current_price: Decimal,
        reason: CloseReason,
    ) -> Action {
        let position = match state.positions.remove(symbol) {
            Some(position) => position,
            None => return Action::None,
        };

        let proceeds = position.quantity * current_price;
        let pnl = position.unrealized_pnl(current_price);
        let pnl_pct = position.pnl_pct(current_price);

        state.capital += proceeds;
        state.closed_pnl += pnl;
        state.daily_pnl += pnl;

        // A break-even close counts as a loss.
        if pnl > Decimal::ZERO {
            state.win_count += 1;
        } else {
            state.loss_count += 1;
        }

        state.pnl_history.push(pnl);

        // Revalue with the exit price of the symbol just closed; remaining
        // positions fall back to their entry price.
        let prices = HashMap::from([(symbol.to_string(), current_price)]);
        let equity = state.total_value(&prices);
        state.equity_curve.push(equity);

        info!(
            "CLOSE {} ({}): {} @ ${} | P&L: ${} ({:.2}%) | Total P&L: ${}",
            symbol, reason, position.quantity, current_price, pnl, pnl_pct, state.closed_pnl
        );

        reason.action()
    }

    /// Total portfolio value (capital plus unrealized P&L) at the given
    /// prices. Positions without a supplied price are valued at entry.
    pub fn total_value(&self, current_prices: &HashMap<String, Decimal>) -> Decimal {
        self.state.lock().unwrap().total_value(current_prices)
    }

    /// Total unrealized P&L across open positions at the given prices.
    pub fn unrealized_pnl(&self, current_prices: &HashMap<String, Decimal>) -> Decimal {
        self.state.lock().unwrap().unrealized_pnl(current_prices)
    }

    /// A copy of the open position for a symbol, if any. Drivers use this
    /// to report attached stop-loss/take-profit levels.
    pub fn position(&self, symbol: &str) -> Option<Position> {
        self.state.lock().unwrap().positions.get(symbol).cloned()
    }

    /// P&L values of closed trades, in close order.
    pub fn pnl_history(&self) -> Vec<Decimal> {
        self.state.lock().unwrap().pnl_history.clone()
    }

    /// Portfolio valuations, seeded with the initial capital and appended
    /// on every close.
    pub fn equity_curve(&self) -> Vec<Decimal> {
        self.state.lock().unwrap().equity_curve.clone()
    }

    /// A consistent snapshot of the full portfolio state. Read-only and
    /// idempotent: calling twice without an intervening mutation yields the
    /// same values.
    pub fn portfolio_state(&self, current_prices: &HashMap<String, Decimal>) -> PortfolioSnapshot {
        let state = self.state.lock().unwrap();
        self.snapshot(&state, current_prices)
    }

    /// Annualized Sharpe ratio of the closed-trade return series.
    pub fn sharpe_ratio(&self, risk_free_rate: f64) -> f64 {
        let state = self.state.lock().unwrap();
        statistics::sharpe_ratio(&state.pnl_history, self.params.initial_capital, risk_free_rate)
    }

    /// Maximum drawdown of the equity curve, as a non-positive fraction.
    pub fn max_drawdown(&self) -> f64 {
        let state = self.state.lock().unwrap();
        statistics::max_drawdown(&state.equity_curve)
    }

    /// Portfolio state combined with derived performance statistics.
    pub fn performance_summary(
        &self,
        current_prices: &HashMap<String, Decimal>,
    ) -> PerformanceSummary {
        let state = self.state.lock().unwrap();

        PerformanceSummary {
            performance: PerformanceStats {
                sharpe_ratio: statistics::sharpe_ratio(
                    &state.pnl_history,
                    self.params.initial_capital,
                    statistics::DEFAULT_RISK_FREE_RATE,
                ),
                max_drawdown: statistics::max_drawdown(&state.equity_curve),
                win_rate: statistics::win_rate(state.win_count, state.trade_count),
                total_trades: state.trade_count,
                avg_win: statistics::average_win(&state.pnl_history),
                avg_loss: statistics::average_loss(&state.pnl_history),
            },
            state: self.snapshot(&state, current_prices),
        }
    }

    /// Reset the daily loss tracking. The engine has no clock; the external
    /// driver invokes this at each daily boundary.
    pub fn reset_daily_metrics(&self) {
        let mut state = self.state.lock().unwrap();
        state.daily_pnl = Decimal::ZERO;
        state.daily_start_capital = state.capital;
        info!("Daily metrics reset");
    }

    fn snapshot(
        &self,
        state: &PortfolioState,
        current_prices: &HashMap<String, Decimal>,
    ) -> PortfolioSnapshot {
        let unrealized_pnl = state.unrealized_pnl(current_prices);
        let total_value = state.capital + unrealized_pnl;

        let positions = state
            .positions
            .iter()
            .map(|(symbol, position)| {
                let price = *current_prices.get(symbol).unwrap_or(&position.entry_price);
                (
                    symbol.clone(),
                    PositionSnapshot {
                        symbol: symbol.clone(),
                        quantity: position.quantity,
                        entry_price: position.entry_price,
                        current_price: price,
                        unrealized_pnl: position.unrealized_pnl(price),
                        pnl_pct: position.pnl_pct(price),
                    },
                )
            })
            .collect();

        PortfolioSnapshot {
            timestamp: Utc::now(),
            capital: state.capital,
            position_count: state.positions.len(),
            positions,
            closed_pnl: state.closed_pnl,
            unrealized_pnl,
            total_pnl: state.closed_pnl + unrealized_pnl,
            total_value,
            return_pct: (total_value - self.params.initial_capital) / self.params.initial_capital
                * Decimal::from(100),
            trade_count: state.trade_count,
            win_count: state.win_count,
            loss_count: state.loss_count,
        }
    }
}
