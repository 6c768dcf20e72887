//! Price sources: the fetch seam and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::Result;
use crate::models::PriceSnapshot;

/// Something that can produce a [`PriceSnapshot`] for a symbol.
///
/// Implemented by [`HttpPriceSource`] in production and by scripted
/// sources in tests.
pub trait PriceSource: Send + Sync + 'static {
    /// Fetches the latest snapshot for `symbol`.
    fn fetch(&self, symbol: &str) -> impl Future<Output = Result<PriceSnapshot>> + Send;
}

/// Fetches snapshots from `GET {base_url}/api/price/{symbol}`.
#[derive(Clone, Debug)]
pub struct HttpPriceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPriceSource {
    /// Creates a source for `base_url`. Requests that take longer than
    /// `timeout` fail and are treated like any other fetch failure.
    ///
    /// # Errors
    ///
    /// Returns [`PriviTradeError::Http`](crate::PriviTradeError::Http) if
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the request URL for `symbol`.
    pub fn price_url(&self, symbol: &str) -> String {
        format!("{}/api/price/{symbol}", self.base_url)
    }
}

impl PriceSource for HttpPriceSource {
    async fn fetch(&self, symbol: &str) -> Result<PriceSnapshot> {
        let url = self.price_url(symbol);
        debug!(%url, "Fetching price snapshot");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let snapshot = serde_json::from_slice(&body)?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_url_joins_base_and_symbol() {
        let source = HttpPriceSource::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.price_url("ETH"), "http://localhost:3000/api/price/ETH");
    }
}
