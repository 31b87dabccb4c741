use async_trait::async_trait;
use common::models::{Interval, PriceBar};

use crate::error::ProviderError;

/// Raw provider payloads convert into domain values through this.
pub trait RemoteResponse<T> {
    fn to_domain(self) -> Result<T, ProviderError>;
}

/// Source of historical bars. Implementations own their timeout and retry
/// policy; callers see a single awaited call.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// `ticker` is already in the provider's own symbology. Bars come back in
    /// ascending timestamp order; an empty vector is a valid answer.
    async fn fetch_bars(
        &self,
        ticker: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<PriceBar>, ProviderError>;
}
