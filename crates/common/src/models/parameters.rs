use serde::Serialize;

use crate::error::ParameterError;

/// Per-run sizing inputs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingParameters {
    currency_pair: String,
    account_balance: f64,
    risk_percent: f64,
    stop_loss_pips: u32,
    pip_value: f64,
}

impl TradingParameters {
    pub fn new(
        currency_pair: impl Into<String>,
        account_balance: f64,
        risk_percent: f64,
        stop_loss_pips: u32,
        pip_value: f64,
    ) -> Result<Self, ParameterError> {
        let currency_pair = currency_pair.into();
        if currency_pair.trim().is_empty() {
            return Err(ParameterError::EmptyPair);
        }
        // `!(x > 0.0)` also rejects NaN
        if !(account_balance > 0.0) {
            return Err(ParameterError::NotPositive {
                field: "account_balance",
                value: account_balance,
            });
        }
        if !(risk_percent > 0.0 && risk_percent <= 100.0) {
            return Err(ParameterError::RiskOutOfRange(risk_percent));
        }
        if stop_loss_pips == 0 {
            return Err(ParameterError::NotPositive {
                field: "stop_loss_pips",
                value: 0.0,
            });
        }
        if !(pip_value > 0.0) || !pip_value.is_finite() {
            return Err(ParameterError::NotPositive {
                field: "pip_value",
                value: pip_value,
            });
        }

        Ok(Self {
            currency_pair,
            account_balance,
            risk_percent,
            stop_loss_pips,
            pip_value,
        })
    }

    pub fn currency_pair(&self) -> &str {
        &self.currency_pair
    }

    pub fn account_balance(&self) -> f64 {
        self.account_balance
    }

    pub fn risk_percent(&self) -> f64 {
        self.risk_percent
    }

    pub fn stop_loss_pips(&self) -> u32 {
        self.stop_loss_pips
    }

    pub fn pip_value(&self) -> f64 {
        self.pip_value
    }

    /// Price distance used for both take-profit and stop-loss.
    pub fn stop_distance(&self) -> f64 {
        f64::from(self.stop_loss_pips) * self.pip_value
    }
}
