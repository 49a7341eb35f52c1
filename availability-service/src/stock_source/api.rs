use super::{StockSource, StockSourceError, StockSourceResult};
use crate::availability::StockLookup;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Stock figures fetched per request from a remote inventory API:
/// `GET {base}/api/inventory?product_id=..&warehouse=..` answering `{"stock_level": n}`.
#[derive(Clone)]
pub struct ApiStockSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StockLevelResponse {
    stock_level: i64,
}

impl ApiStockSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> StockSourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StockSourceError::Remote(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, product_id: &str, warehouse: &str) -> StockSourceResult<Option<u64>> {
        let response = self
            .client
            .get(format!("{}/api/inventory", self.base_url))
            .query(&[("product_id", product_id), ("warehouse", warehouse)])
            .send()
            .await
            .map_err(|err| StockSourceError::Remote(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StockSourceError::Remote(format!(
                "HTTP {} from {}",
                response.status(),
                self.base_url
            )));
        }

        let body: StockLevelResponse = response
            .json()
            .await
            .map_err(|err| StockSourceError::Parse(err.to_string()))?;
        let stock = u64::try_from(body.stock_level).map_err(|_| {
            StockSourceError::InvalidRecord(format!(
                "negative stock level {} for product {} in warehouse {}",
                body.stock_level, product_id, warehouse
            ))
        })?;
        Ok(Some(stock))
    }
}

#[async_trait]
impl StockSource for ApiStockSource {
    /// Probes `{base}/healthz` so a misconfigured URL fails at startup.
    async fn load(&self) -> StockSourceResult<()> {
        let url = format!("{}/healthz", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| StockSourceError::Remote(err.to_string()))?;
        if !response.status().is_success() {
            return Err(StockSourceError::Remote(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        info!(base_url = %self.base_url, "Inventory API reachable");
        Ok(())
    }

    async fn lookup(&self, product_id: &str, warehouse: &str) -> StockLookup {
        match self.fetch(product_id, warehouse).await {
            Ok(Some(stock)) => StockLookup::Found(stock),
            Ok(None) => {
                debug!(product_id, warehouse, "Inventory API has no entry");
                StockLookup::NotFound
            }
            Err(err) => {
                warn!(
                    error = %err,
                    product_id,
                    warehouse,
                    "Inventory API lookup failed; treating as not found"
                );
                StockLookup::NotFound
            }
        }
    }

    fn describe(&self) -> String {
        format!("api:{}", self.base_url)
    }
}
