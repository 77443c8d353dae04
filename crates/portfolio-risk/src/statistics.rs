//! Performance statistics over the engine's recorded series.

use rust_decimal::Decimal;

/// Annual risk-free rate used for the Sharpe ratio by default.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Trading periods per year used to annualize. A fixed convention, applied
/// verbatim to whatever cadence trades actually occur at.
const ANNUALIZATION_PERIODS: f64 = 252.0;

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(0.0)
}

/// Annualized Sharpe ratio of the per-trade return series
/// `pnl_history / initial_capital`, in excess of `risk_free_rate / 252`.
///
/// Uses the population standard deviation. Returns 0 with fewer than two
/// closed trades or zero return deviation.
pub fn sharpe_ratio(pnl_history: &[Decimal], initial_capital: Decimal, risk_free_rate: f64) -> f64 {
    if pnl_history.len() < 2 {
        return 0.0;
    }

    let capital = to_f64(initial_capital);
    let per_period_rf = risk_free_rate / ANNUALIZATION_PERIODS;
    let excess: Vec<f64> = pnl_history
        .iter()
        .map(|pnl| to_f64(*pnl) / capital - per_period_rf)
        .collect();

    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / excess.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return 0.0;
    }

    ANNUALIZATION_PERIODS.sqrt() * mean / std_dev
}

/// Largest decline of the equity curve from its running peak, as a
/// non-positive fraction. Returns 0 with fewer than two points.
pub fn max_drawdown(equity_curve: &[Decimal]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let mut running_max = to_f64(equity_curve[0]);
    let mut max_dd = 0.0_f64;
    for equity in &equity_curve[1..] {
        let equity = to_f64(*equity);
        if equity > running_max {
            running_max = equity;
        }
        let drawdown = (equity - running_max) / running_max;
        if drawdown < max_dd {
            max_dd = drawdown;
        }
    }
    max_dd
}

/// Winning fraction of closed trades, 0 with no trades.
pub fn win_rate(win_count: usize, trade_count: usize) -> f64 {
    if trade_count == 0 {
        return 0.0;
    }
    win_count as f64 / trade_count as f64
}

/// Mean of the positive entries in the P&L history, 0 if there are none.
pub fn average_win(pnl_history: &[Decimal]) -> Decimal {
    let wins: Vec<Decimal> = pnl_history
        .iter()
        .copied()
        .filter(|pnl| *pnl > Decimal::ZERO)
        .collect();
    if wins.is_empty() {
        return Decimal::ZERO;
    }
    wins.iter().copied().sum::<Decimal>() / Decimal::from(wins.len())
}

/// Mean of the negative entries in the P&L history, 0 if there are none.
pub fn average_loss(pnl_history: &[Decimal]) -> Decimal {
    let losses: Vec<Decimal> = pnl_history
        .iter()
        .copied()
        .filter(|pnl| *pnl < Decimal::ZERO)
        .collect();
    if losses.is_empty() {
        return Decimal::ZERO;
    }
    losses.iter().copied().sum::<Decimal>() / Decimal::from(losses.len())
}
