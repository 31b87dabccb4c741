use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::error::SeriesError;
use crate::models::{Interval, PriceBar};

/// A bar plus the indicator values aligned to its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
}

impl SeriesRow {
    pub fn is_complete(&self) -> bool {
        self.close.is_finite()
            && self.sma.is_some_and(f64::is_finite)
            && self.ema.is_some_and(f64::is_finite)
            && self.rsi.is_some_and(f64::is_finite)
    }
}

impl From<PriceBar> for SeriesRow {
    fn from(bar: PriceBar) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma: None,
            ema: None,
            rsi: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    interval: Interval,
    rows: Vec<SeriesRow>,
}

impl PriceSeries {
    /// Builds the series in ascending timestamp order. Bars with a non-finite
    /// price are dropped here so indicator windows never see them.
    pub fn from_bars(ticker: impl Into<String>, interval: Interval, bars: Vec<PriceBar>) -> Self {
        let ticker = ticker.into();
        let total = bars.len();

        let mut rows: Vec<SeriesRow> = bars
            .into_iter()
            .filter(PriceBar::is_finite)
            .map(SeriesRow::from)
            .collect();

        if rows.len() < total {
            warn!(
                "{}: skipped {} bars with non-finite prices",
                ticker,
                total - rows.len()
            );
        }

        rows.sort_by_key(|row| row.timestamp);

        Self {
            ticker,
            interval,
            rows,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&SeriesRow> {
        self.rows.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.close).collect()
    }

    pub fn attach_indicators(
        &mut self,
        sma: &[Option<f64>],
        ema: &[Option<f64>],
        rsi: &[Option<f64>],
    ) -> Result<(), SeriesError> {
        for (column, values) in [("sma", sma), ("ema", ema), ("rsi", rsi)] {
            if values.len() != self.rows.len() {
                return Err(SeriesError::Misaligned {
                    column,
                    expected: self.rows.len(),
                    got: values.len(),
                });
            }
        }

        for (i, row) in self.rows.iter_mut().enumerate() {
            row.sma = sma[i];
            row.ema = ema[i];
            row.rsi = rsi[i];
        }
        Ok(())
    }

    /// Removes every row missing close, SMA, EMA or RSI. Returns how many went.
    pub fn drop_incomplete(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(SeriesRow::is_complete);
        before - self.rows.len()
    }
}
