use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{TickerError, TickerResult};

/// Authenticated JSON GET. Any non-success status is an error carrying the
/// status code and the requested URL.
pub trait ApiTransport: Send + Sync {
    fn get_json(&self, url: String, bearer: String) -> BoxFuture<'static, TickerResult<Value>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(request_timeout_ms: u64) -> TickerResult<Self> {
        let mut builder = reqwest::Client::builder();
        if request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(request_timeout_ms));
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl ApiTransport for HttpTransport {
    fn get_json(&self, url: String, bearer: String) -> BoxFuture<'static, TickerResult<Value>> {
        let http = self.http.clone();
        Box::pin(async move {
            let resp = http.get(&url).bearer_auth(&bearer).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(TickerError::Status {
                    status: status.as_u16(),
                    url,
                });
            }
            Ok(resp.json::<Value>().await?)
        })
    }
}

/// The three upstream payloads, untyped. Shapes vary between API versions.
#[derive(Debug, Clone)]
pub struct RawPayloads {
    pub portfolio: Value,
    pub trades: Value,
    pub positions: Value,
}

#[derive(Clone)]
pub struct SimmerClient {
    base_url: String,
    api_key: String,
    trades_limit: u32,
    transport: Arc<dyn ApiTransport>,
}

impl SimmerClient {
    pub fn new(cfg: &ApiConfig, api_key: String, transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            base_url: cfg.base_url.trim().trim_end_matches('/').to_string(),
            api_key,
            trades_limit: cfg.trades_limit,
            transport,
        }
    }

    pub fn portfolio_url(&self) -> String {
        format!("{}/api/sdk/portfolio", self.base_url)
    }

    pub fn trades_url(&self) -> String {
        format!("{}/api/sdk/trades?limit={}", self.base_url, self.trades_limit)
    }

    pub fn positions_url(&self) -> String {
        format!("{}/api/sdk/positions", self.base_url)
    }

    /// Fetches portfolio, trades and positions concurrently. Fails as a whole
    /// if any single request fails.
    pub async fn fetch_all(&self) -> TickerResult<RawPayloads> {
        let (portfolio, trades, positions) = tokio::try_join!(
            self.get(self.portfolio_url()),
            self.get(self.trades_url()),
            self.get(self.positions_url()),
        )?;

        tracing::debug!(
            target: "simmer_api",
            base_url = %self.base_url,
            "fetched portfolio, trades and positions"
        );

        Ok(RawPayloads {
            portfolio,
            trades,
            positions,
        })
    }

    fn get(&self, url: String) -> BoxFuture<'static, TickerResult<Value>> {
        self.transport.get_json(url, self.api_key.clone())
    }
}

#[cfg(test)]
pub use fake::FakeTransport;
