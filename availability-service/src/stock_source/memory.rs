use super::{StockSource, StockSourceResult};
use crate::availability::StockLookup;
use async_trait::async_trait;
use std::collections::HashMap;

/// Fixed stock table held in memory. `load` is a no-op.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockSource {
    index: HashMap<(String, String), u64>,
}

impl InMemoryStockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(
        mut self,
        product_id: impl Into<String>,
        warehouse: impl Into<String>,
        stock: u64,
    ) -> Self {
        self.index.insert((product_id.into(), warehouse.into()), stock);
        self
    }
}

#[async_trait]
impl StockSource for InMemoryStockSource {
    async fn load(&self) -> StockSourceResult<()> {
        Ok(())
    }

    async fn lookup(&self, product_id: &str, warehouse: &str) -> StockLookup {
        self.index
            .get(&(product_id.to_string(), warehouse.to_string()))
            .map(|stock| StockLookup::Found(*stock))
            .unwrap_or(StockLookup::NotFound)
    }

    fn describe(&self) -> String {
        format!("memory:{} entries", self.index.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_stock_is_distinct_from_missing() {
        let source = InMemoryStockSource::new().with_stock("PROD-789", "DE-Berlin", 0);
        assert_eq!(source.lookup("PROD-789", "DE-Berlin").await, StockLookup::Found(0));
        assert_eq!(source.lookup("PROD-789", "US-NewYork").await, StockLookup::NotFound);
    }
}
