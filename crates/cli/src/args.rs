use clap::{Parser, ValueEnum};

use common::ParameterError;
use common::models::pair::SUPPORTED_PAIRS;
use common::models::{Interval, TradingParameters};
use market_data::config::SUPPORTED_PERIODS;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Forex trading signal generator: SMA/EMA/RSI on recent bars, a Buy/Sell/Hold
/// call and a risk-based lot size.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Currency pair to analyse
    #[arg(long, default_value = "XAUUSD", value_parser = SUPPORTED_PAIRS)]
    pub pair: String,

    /// Account balance in USD (at least 100)
    #[arg(long, default_value_t = 1000.0, value_parser = parse_balance)]
    pub balance: f64,

    /// Percentage of the balance risked on the trade (0.1 to 5.0)
    #[arg(long, default_value_t = 1.0, value_parser = parse_risk)]
    pub risk: f64,

    /// Stop loss distance in pips (at least 10)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(10..))]
    pub stop_loss_pips: u32,

    /// Monetary value of one pip in USD (at least 0.01)
    #[arg(long, default_value_t = 10.0, value_parser = parse_pip_value)]
    pub pip_value: f64,

    /// Bar interval: 1d, 1h, 5m or 1wk
    #[arg(long, default_value = "1d")]
    pub interval: Interval,

    /// Lookback period requested from the provider
    #[arg(long, default_value = "1mo", value_parser = SUPPORTED_PERIODS)]
    pub period: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip the Close/SMA/EMA chart in text output
    #[arg(long, default_value_t = false)]
    pub no_chart: bool,
}

impl Cli {
    pub fn trading_parameters(&self) -> Result<TradingParameters, ParameterError> {
        TradingParameters::new(
            self.pair.clone(),
            self.balance,
            self.risk,
            self.stop_loss_pips,
            self.pip_value,
        )
    }
}

fn parse_bounded(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !(min..=max).contains(&value) {
        return Err(if max.is_finite() {
            format!("{value} is outside {min}..={max}")
        } else {
            format!("{value} is below the minimum of {min}")
        });
    }
    Ok(value)
}

fn parse_balance(s: &str) -> Result<f64, String> {
    parse_bounded(s, 100.0, f64::INFINITY)
}

fn parse_risk(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.1, 5.0)
}

fn parse_pip_value(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.01, f64::INFINITY)
}
