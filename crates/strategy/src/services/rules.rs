use common::models::{Action, Signal};

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

/// Threshold rule on a single bar. Strict inequalities: RSI sitting exactly on
/// a threshold holds.
pub fn classify(rsi: f64, close: f64, sma: f64, stop_distance: f64) -> Signal {
    if rsi < OVERSOLD && close > sma {
        Signal {
            action: Action::Buy,
            entry_price: close,
            take_profit: Some(close + stop_distance),
            stop_loss: Some(close - stop_distance),
        }
    } else if rsi > OVERBOUGHT && close < sma {
        Signal {
            action: Action::Sell,
            entry_price: close,
            take_profit: Some(close - stop_distance),
            stop_loss: Some(close + stop_distance),
        }
    } else {
        Signal::hold(close)
    }
}
