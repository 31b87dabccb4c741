use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use common::models::{Interval, PriceBar};

use crate::config::{MAX_BACKOFF, ProviderConfig};
use crate::error::ProviderError;
use crate::remote::chart_response::ChartResponse;
use crate::traits::{PriceProvider, RemoteResponse};

pub struct YahooClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base: Duration,
}

impl YahooClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            max_retries: config.max_retries,
            backoff_base: config.backoff_base,
        })
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(ProviderConfig::from_env())
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/{}", self.base_url, ticker)
    }

    /// Sleep before retry number `attempt` (1-based), capped at [`MAX_BACKOFF`].
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base.saturating_mul(factor).min(MAX_BACKOFF)
    }

    async fn make_request(
        &self,
        url: &str,
        interval: Interval,
        period: &str,
    ) -> Result<ChartResponse, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(&[("range", period), ("interval", interval.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited { attempts: 1 });
        }
        // 404 still carries a chart.error body worth decoding
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<ChartResponse>(&text)
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PriceProvider for YahooClient {
    async fn fetch_bars(
        &self,
        ticker: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = self.chart_url(ticker);
        info!("Fetching {} bars for {} over {}", interval, ticker, period);

        let mut retry_count = 0;
        loop {
            match self.make_request(&url, interval, period).await {
                Ok(response) => {
                    let bars = response.to_domain()?;
                    debug!("Received {} bars for {}", bars.len(), ticker);
                    return Ok(bars);
                }
                Err(ProviderError::RateLimited { .. }) => {
                    retry_count += 1;
                    if retry_count > self.max_retries {
                        return Err(ProviderError::RateLimited {
                            attempts: retry_count,
                        });
                    }

                    let backoff = self.backoff(retry_count);
                    warn!(
                        "Rate limited for {}, backing off for {:?} (attempt {}/{})",
                        ticker, backoff, retry_count, self.max_retries
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
