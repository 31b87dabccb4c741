pub mod chart;
pub mod report;

use anyhow::Context;
use tracing::info;

use common::models::TradingParameters;
use market_data::PriceProvider;
use strategy::SignalModel;

use crate::args::{Cli, OutputFormat};
use report::SignalReport;

/// fetch → signal → lot size, in that order. Output is only produced once
/// every step succeeded.
pub async fn run<P: PriceProvider>(
    args: &Cli,
    params: TradingParameters,
    provider: P,
) -> anyhow::Result<String> {
    let mut model = SignalModel::new(params, provider);

    info!("Fetching data for {}...", args.pair);
    model.fetch_data(args.interval, &args.period).await?;

    let signal = model.generate_signal()?;
    let lot_size = model.calculate_lot_size();

    let report = SignalReport {
        pair: model.params().currency_pair(),
        ticker: model.ticker(),
        interval: args.interval,
        period: &args.period,
        signal,
        lot_size,
        series: model.series().map(|s| s.rows()).unwrap_or_default(),
    };

    match args.format {
        OutputFormat::Text => Ok(report.to_text(!args.no_chart)),
        OutputFormat::Json => report.to_json().context("failed to serialize report"),
    }
}
