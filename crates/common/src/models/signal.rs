use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.write_str("Buy"),
            Action::Sell => f.write_str("Sell"),
            Action::Hold => f.write_str("Hold"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: Action,
    pub entry_price: f64,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
}

impl Signal {
    pub fn hold(entry_price: f64) -> Self {
        Self {
            action: Action::Hold,
            entry_price,
            take_profit: None,
            stop_loss: None,
        }
    }
}
