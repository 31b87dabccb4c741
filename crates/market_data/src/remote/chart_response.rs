use chrono::DateTime;
use serde::Deserialize;

use common::models::PriceBar;

use crate::error::ProviderError;
use crate::traits::RemoteResponse;

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartIndicators {
    pub quote: Vec<ChartQuote>,
}

/// Column-oriented OHLCV; Yahoo pads missing bars with nulls.
#[derive(Deserialize, Debug, Default)]
pub struct ChartQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl RemoteResponse<Vec<PriceBar>> for ChartResponse {
    fn to_domain(self) -> Result<Vec<PriceBar>, ProviderError> {
        if let Some(error) = self.chart.error {
            return Err(ProviderError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };
        let Some(timestamps) = result.timestamp else {
            return Ok(Vec::new());
        };
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::Decode(format!("{}: no quote block", result.meta.symbol))
            })?;

        let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.into_iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                column(&quote.open, i),
                column(&quote.high, i),
                column(&quote.low, i),
                column(&quote.close, i),
            ) else {
                continue;
            };

            let timestamp = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| ProviderError::Decode(format!("timestamp {} out of range", ts)))?;

            bars.push(PriceBar {
                timestamp,
                open,
                high,
                low,
                close,
                volume: column(&quote.volume, i),
            });
        }

        bars.sort_by_key(|bar| bar.timestamp);
        Ok(bars)
    }
}
