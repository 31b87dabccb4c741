use common::SeriesError;
use market_data::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("error fetching data for {ticker}: {source}")]
    DataUnavailable {
        ticker: String,
        #[source]
        source: ProviderError,
    },

    #[error("data not loaded or insufficient data for generating signals")]
    NotReady,

    #[error("indicator computation failed: {0}")]
    Indicator(String),

    #[error(transparent)]
    Series(#[from] SeriesError),
}
