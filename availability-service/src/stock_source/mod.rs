use crate::availability::StockLookup;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

pub mod api;
pub mod file;
pub mod memory;

pub use api::ApiStockSource;
pub use file::FileStockSource;
pub use memory::InMemoryStockSource;

pub type StockSourceResult<T> = Result<T, StockSourceError>;

#[derive(Debug, Error)]
pub enum StockSourceError {
    #[error("failed to read inventory file {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse inventory data: {0}")]
    Parse(String),
    #[error("invalid inventory record: {0}")]
    InvalidRecord(String),
    #[error("inventory API request failed: {0}")]
    Remote(String),
}

/// One stock figure as stored in inventory data files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryRecord {
    pub product_id: String,
    pub warehouse: String,
    pub stock_level: i64,
}

/// Where stock figures come from. The evaluator only ever sees the resolved
/// `StockLookup`, so any implementation can be swapped in behind `AppState`.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// (Re)load backing data. Lookups answer from the most recent successful load.
    async fn load(&self) -> StockSourceResult<()>;

    /// Stock for a (product, warehouse) pair. Unknown pairs are `NotFound`,
    /// never an error.
    async fn lookup(&self, product_id: &str, warehouse: &str) -> StockLookup;

    fn describe(&self) -> String;
}

/// Build the (product, warehouse) index used by the in-process sources.
/// The first record for a pair wins; negative stock is rejected.
pub(crate) fn index_records(
    records: Vec<InventoryRecord>,
) -> StockSourceResult<HashMap<(String, String), u64>> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        let stock = u64::try_from(record.stock_level).map_err(|_| {
            StockSourceError::InvalidRecord(format!(
                "product {} in warehouse {} has negative stock level {}",
                record.product_id, record.warehouse, record.stock_level
            ))
        })?;
        index
            .entry((record.product_id, record.warehouse))
            .or_insert(stock);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product: &str, warehouse: &str, stock: i64) -> InventoryRecord {
        InventoryRecord {
            product_id: product.into(),
            warehouse: warehouse.into(),
            stock_level: stock,
        }
    }

    #[test]
    fn first_record_wins_on_duplicate_pair() {
        let index = index_records(vec![
            record("PROD-1", "DE-Berlin", 10),
            record("PROD-1", "DE-Berlin", 99),
        ])
        .unwrap();
        assert_eq!(index.get(&("PROD-1".to_string(), "DE-Berlin".to_string())), Some(&10));
    }

    #[test]
    fn negative_stock_rejected() {
        let err = index_records(vec![record("PROD-1", "DE-Berlin", -1)]).unwrap_err();
        assert!(matches!(err, StockSourceError::InvalidRecord(_)));
    }
}
