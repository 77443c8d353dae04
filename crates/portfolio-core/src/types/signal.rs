//! Trading signals and engine actions.

use serde::{Deserialize, Serialize};

/// An external instruction proposing an action for a symbol at a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Open a long position
    Buy,
    /// Close the position, if any
    Sell,
    /// Explicit no-op
    #[default]
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// The action the engine actually took for a signal.
///
/// May differ from the signal that was requested: exit levels on an open
/// position take priority, and rejected opens report [`Action::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// A position was opened
    Buy,
    /// A position was closed on signal
    Sell,
    /// A position was force-closed at its stop-loss level
    StopLoss,
    /// A position was force-closed at its take-profit level
    TakeProfit,
    /// No state change
    None,
}

impl Action {
    /// Check whether the action closed a position.
    pub fn is_exit(&self) -> bool {
        matches!(self, Action::Sell | Action::StopLoss | Action::TakeProfit)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::StopLoss => write!(f, "STOP_LOSS"),
            Action::TakeProfit => write!(f, "TAKE_PROFIT"),
            Action::None => write!(f, "NONE"),
        }
    }
}

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseReason {
    /// Closed by an incoming sell signal
    Signal,
    /// Price reached the stop-loss level
    StopLoss,
    /// Price reached the take-profit level
    TakeProfit,
}

impl CloseReason {
    /// The public action reported for a close with this reason.
    pub fn action(self) -> Action {
        match self {
            CloseReason::Signal => Action::Sell,
            CloseReason::StopLoss => Action::StopLoss,
            CloseReason::TakeProfit => Action::TakeProfit,
        }
    }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::Signal => write!(f, "SIGNAL"),
            CloseReason::StopLoss => write!(f, "STOP_LOSS"),
            CloseReason::TakeProfit => write!(f, "TAKE_PROFIT"),
        }
    }
}
