use tracing::{debug, error, info, warn};

use common::models::{Interval, PriceSeries, Signal, TradingParameters, provider_ticker};
use market_data::{PriceProvider, ProviderError};

use crate::error::SignalError;
use crate::indicators::{self, DEFAULT_WINDOW, IndicatorKind};
use crate::services::{rules, sizing};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// Nothing fetched yet.
    Empty,
    /// Indicators attached and incomplete rows removed. May hold zero rows.
    Loaded(PriceSeries),
    /// The last fetch failed; a new run needs a new model.
    Failed,
}

/// Fetch → indicators → incomplete-row removal → classification, for one
/// pair. One instance per run; nothing is cached between fetches.
pub struct SignalModel<P> {
    params: TradingParameters,
    provider: P,
    state: ModelState,
}

impl<P: PriceProvider> SignalModel<P> {
    pub fn new(params: TradingParameters, provider: P) -> Self {
        Self {
            params,
            provider,
            state: ModelState::Empty,
        }
    }

    pub fn params(&self) -> &TradingParameters {
        &self.params
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn ticker(&self) -> &str {
        provider_ticker(self.params.currency_pair())
    }

    /// The retained series, once loaded.
    pub fn series(&self) -> Option<&PriceSeries> {
        match &self.state {
            ModelState::Loaded(series) => Some(series),
            _ => None,
        }
    }

    /// Replaces any previous series. Returns the number of retained rows.
    pub async fn fetch_data(
        &mut self,
        interval: Interval,
        period: &str,
    ) -> Result<usize, SignalError> {
        info!(
            "Fetching data for {} ({}, {} over {})",
            self.params.currency_pair(),
            self.ticker(),
            interval,
            period
        );

        match self.load(interval, period).await {
            Ok(series) => {
                let retained = series.len();
                if retained == 0 {
                    warn!(
                        "{}: no rows left after removing indicator warm-up",
                        series.ticker()
                    );
                }
                self.state = ModelState::Loaded(series);
                Ok(retained)
            }
            Err(e) => {
                error!("Fetch failed: {}", e);
                self.state = ModelState::Failed;
                Err(e)
            }
        }
    }

    async fn load(&self, interval: Interval, period: &str) -> Result<PriceSeries, SignalError> {
        let ticker = self.ticker().to_string();

        let bars = match self.provider.fetch_bars(&ticker, interval, period).await {
            Ok(bars) if bars.is_empty() => {
                return Err(SignalError::DataUnavailable {
                    source: ProviderError::NoData {
                        ticker: ticker.clone(),
                    },
                    ticker,
                });
            }
            Ok(bars) => bars,
            Err(source) => return Err(SignalError::DataUnavailable { ticker, source }),
        };

        let mut series = PriceSeries::from_bars(ticker, interval, bars);
        let closes = series.closes();

        let sma = indicators::compute(IndicatorKind::Sma, &closes, DEFAULT_WINDOW)?;
        let ema = indicators::compute(IndicatorKind::Ema, &closes, DEFAULT_WINDOW)?;
        let rsi = indicators::compute(IndicatorKind::Rsi, &closes, DEFAULT_WINDOW)?;
        series.attach_indicators(&sma, &ema, &rsi)?;

        let dropped = series.drop_incomplete();
        debug!(
            "{}: {} bars fetched, {} warm-up rows dropped, {} retained",
            series.ticker(),
            closes.len(),
            dropped,
            series.len()
        );

        Ok(series)
    }

    /// Classifies the most recent retained row.
    pub fn generate_signal(&self) -> Result<Signal, SignalError> {
        let row = self
            .series()
            .and_then(PriceSeries::latest)
            .ok_or(SignalError::NotReady)?;

        let (Some(rsi), Some(sma)) = (row.rsi, row.sma) else {
            return Err(SignalError::NotReady);
        };

        let signal = rules::classify(rsi, row.close, sma, self.params.stop_distance());
        info!(
            "{} signal at {}: RSI={:.2} Close={} SMA={:.5}",
            signal.action, row.timestamp, rsi, row.close, sma
        );
        Ok(signal)
    }

    /// Depends on the trading parameters only, so it works in any state.
    pub fn calculate_lot_size(&self) -> f64 {
        sizing::lot_size(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use common::models::{Action, PriceBar};
    use mockall::mock;

    mock! {
        Provider {}

        #[async_trait]
        impl PriceProvider for Provider {
            async fn fetch_bars(
                &self,
                ticker: &str,
                interval: Interval,
                period: &str,
            ) -> Result<Vec<PriceBar>, ProviderError>;
        }
    }

    fn params() -> TradingParameters {
        TradingParameters::new("XAUUSD", 1000.0, 1.0, 50, 10.0).unwrap()
    }

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: Some(1_000.0),
            })
            .collect()
    }

    fn provider_returning(closes: Vec<f64>) -> MockProvider {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_bars()
            .withf(|ticker, interval, period| {
                ticker == "GC=F" && *interval == Interval::OneDay && period == "1mo"
            })
            .times(1)
            .returning(move |_, _, _| Ok(bars(&closes)));
        provider
    }

    fn loaded_with(rsi: f64, close: f64, sma: f64) -> SignalModel<MockProvider> {
        let mut series = PriceSeries::from_bars("GC=F", Interval::OneDay, bars(&[close]));
        series
            .attach_indicators(&[Some(sma)], &[Some(sma)], &[Some(rsi)])
            .unwrap();

        let mut model = SignalModel::new(params(), MockProvider::new());
        model.state = ModelState::Loaded(series);
        model
    }

    #[tokio::test]
    async fn fetch_keeps_a_complete_contiguous_suffix() {
        let closes: Vec<f64> = (0..40).map(|i| 1900.0 + (i as f64 * 0.9).sin() * 15.0).collect();
        let mut model = SignalModel::new(params(), provider_returning(closes.clone()));

        let retained = model.fetch_data(Interval::OneDay, "1mo").await.unwrap();
        assert_eq!(retained, 40 - DEFAULT_WINDOW);

        let series = model.series().unwrap();
        assert!(series.rows().iter().all(|row| row.is_complete()));

        let expected: Vec<_> = bars(&closes)[DEFAULT_WINDOW..]
            .iter()
            .map(|bar| bar.timestamp)
            .collect();
        let actual: Vec<_> = series.rows().iter().map(|row| row.timestamp).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn retained_rows_match_indicator_engine() {
        let closes: Vec<f64> = (0..30).map(|i| 1.08 + (i as f64 * 0.4).cos() * 0.01).collect();
        let mut model = SignalModel::new(params(), provider_returning(closes.clone()));
        model.fetch_data(Interval::OneDay, "1mo").await.unwrap();

        let sma = indicators::compute(IndicatorKind::Sma, &closes, DEFAULT_WINDOW).unwrap();
        let rsi = indicators::compute(IndicatorKind::Rsi, &closes, DEFAULT_WINDOW).unwrap();
        let latest = model.series().and_then(PriceSeries::latest).unwrap();
        assert_eq!(latest.sma, sma[29]);
        assert_eq!(latest.rsi, rsi[29]);
        assert_eq!(latest.close, closes[29]);
    }

    #[tokio::test]
    async fn empty_fetch_is_data_unavailable() {
        let mut model = SignalModel::new(params(), provider_returning(Vec::new()));

        let err = model.fetch_data(Interval::OneDay, "1mo").await.unwrap_err();
        assert!(matches!(
            err,
            SignalError::DataUnavailable {
                source: ProviderError::NoData { .. },
                ..
            }
        ));
        assert_eq!(model.state(), &ModelState::Failed);
        assert!(model.series().is_none());
    }

    #[tokio::test]
    async fn provider_error_is_wrapped_with_its_cause() {
        let mut provider = MockProvider::new();
        provider.expect_fetch_bars().times(1).returning(|_, _, _| {
            Err(ProviderError::Api {
                code: "Not Found".into(),
                description: "No data found, symbol may be delisted".into(),
            })
        });
        let mut model = SignalModel::new(params(), provider);

        let err = model.fetch_data(Interval::OneHour, "5d").await.unwrap_err();
        match &err {
            SignalError::DataUnavailable { ticker, source } => {
                assert_eq!(ticker, "GC=F");
                assert!(matches!(source, ProviderError::Api { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(model.generate_signal(), Err(SignalError::NotReady)));
    }

    #[tokio::test]
    async fn unmapped_pair_is_sent_as_is() {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_bars()
            .withf(|ticker, _, _| ticker == "AUDUSD=X")
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let params = TradingParameters::new("AUDUSD=X", 1000.0, 1.0, 50, 10.0).unwrap();
        let mut model = SignalModel::new(params, provider);
        assert!(model.fetch_data(Interval::OneDay, "1mo").await.is_err());
    }

    #[tokio::test]
    async fn failed_refetch_discards_previous_series() {
        let mut calls = 0;
        let mut provider = MockProvider::new();
        provider.expect_fetch_bars().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Ok(bars(&[1.0; 20]))
            } else {
                Err(ProviderError::NoData {
                    ticker: "GC=F".into(),
                })
            }
        });
        let mut model = SignalModel::new(params(), provider);

        model.fetch_data(Interval::OneDay, "1mo").await.unwrap();
        assert!(model.series().is_some());

        model.fetch_data(Interval::OneDay, "1mo").await.unwrap_err();
        assert_eq!(model.state(), &ModelState::Failed);
        assert!(model.series().is_none());
    }

    #[tokio::test]
    async fn short_history_loads_empty_and_is_not_ready() {
        let mut model = SignalModel::new(params(), provider_returning(vec![1.0; 10]));

        let retained = model.fetch_data(Interval::OneDay, "1mo").await.unwrap();
        assert_eq!(retained, 0);
        assert!(matches!(model.state(), ModelState::Loaded(s) if s.is_empty()));
        assert!(matches!(model.generate_signal(), Err(SignalError::NotReady)));
    }

    #[test]
    fn signal_before_fetch_is_not_ready() {
        let model = SignalModel::new(params(), MockProvider::new());
        assert_eq!(model.state(), &ModelState::Empty);
        assert!(matches!(model.generate_signal(), Err(SignalError::NotReady)));
    }

    #[test]
    fn latest_row_drives_the_signal() {
        let distance = params().stop_distance();

        let buy = loaded_with(25.0, 110.0, 100.0).generate_signal().unwrap();
        assert_eq!(buy.action, Action::Buy);
        assert_eq!(buy.take_profit, Some(110.0 + distance));
        assert_eq!(buy.stop_loss, Some(110.0 - distance));

        let sell = loaded_with(75.0, 90.0, 100.0).generate_signal().unwrap();
        assert_eq!(sell.action, Action::Sell);
        assert_eq!(sell.take_profit, Some(90.0 - distance));
        assert_eq!(sell.stop_loss, Some(90.0 + distance));

        for rsi in [50.0, 30.0, 70.0] {
            let hold = loaded_with(rsi, 100.0, 100.0).generate_signal().unwrap();
            assert_eq!(hold, Signal::hold(100.0));
        }
    }

    #[test]
    fn lot_size_needs_no_data() {
        let model = SignalModel::new(params(), MockProvider::new());
        assert_eq!(model.state(), &ModelState::Empty);
        assert_eq!(model.calculate_lot_size(), 0.02);
    }

    #[tokio::test]
    async fn flat_prices_hold_at_the_last_close() {
        let mut model = SignalModel::new(params(), provider_returning(vec![1950.0; 20]));
        model.fetch_data(Interval::OneDay, "1mo").await.unwrap();

        let signal = model.generate_signal().unwrap();
        assert_eq!(signal, Signal::hold(1950.0));
    }
}
