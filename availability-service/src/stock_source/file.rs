use super::{index_records, InventoryRecord, StockSource, StockSourceError, StockSourceResult};
use crate::availability::StockLookup;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info};

/// Stock figures read from a JSON array of `{product_id, warehouse, stock_level}`.
pub struct FileStockSource {
    path: PathBuf,
    index: RwLock<HashMap<(String, String), u64>>,
}

impl FileStockSource {
    /// Nothing is read until `load` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.read().map(|idx| idx.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StockSource for FileStockSource {
    async fn load(&self) -> StockSourceResult<()> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|err| StockSourceError::Io {
                path: self.path.display().to_string(),
                message: err.to_string(),
            })?;
        let records: Vec<InventoryRecord> = serde_json::from_slice(&data)
            .map_err(|err| StockSourceError::Parse(err.to_string()))?;
        let index = index_records(records)?;
        let count = index.len();
        match self.index.write() {
            Ok(mut guard) => *guard = index,
            // poisoned: the new map replaces whatever was there
            Err(poisoned) => *poisoned.into_inner() = index,
        }
        info!(path = %self.path.display(), entries = count, "Inventory file loaded");
        Ok(())
    }

    async fn lookup(&self, product_id: &str, warehouse: &str) -> StockLookup {
        let key = (product_id.to_string(), warehouse.to_string());
        let found = match self.index.read() {
            Ok(guard) => guard.get(&key).copied(),
            Err(poisoned) => poisoned.into_inner().get(&key).copied(),
        };
        match found {
            Some(stock) => StockLookup::Found(stock),
            None => {
                debug!(product_id, warehouse, "No stock entry for product/warehouse pair");
                StockLookup::NotFound
            }
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
