use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;

use common::logger;
use market_data::YahooClient;

use crate::args::Cli;

mod args;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let args = Cli::parse();
    debug!("Parsed arguments: {:?}", args);

    let params = args
        .trading_parameters()
        .context("invalid trading parameters")?;
    let provider = YahooClient::from_env().context("failed to build market data client")?;

    let report = services::run(&args, params, provider).await?;
    print!("{report}");
    if !report.ends_with('\n') {
        println!();
    }
    Ok(())
}
