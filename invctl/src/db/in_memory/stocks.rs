use async_trait::async_trait;
use tracing::instrument;

use super::{MemoryStore, StockRecord};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::StockRepository;
use crate::db::models::stocks::{Stock, StockCreateDBRequest, StockUpdateDBRequest};
use crate::types::{ProductId, StockId, StockKey};

/// Stock repository over a [`MemoryStore`].
///
/// Records keep only foreign keys; each read joins them against the other tables under the
/// same read lock, so a returned aggregate is always consistent with one point in time.
#[derive(Debug, Clone)]
pub struct InMemoryStocks {
    store: MemoryStore,
}

impl InMemoryStocks {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StockRepository for InMemoryStocks {
    #[instrument(skip(self, request), fields(serial = %request.serial, product_id = request.product_id), err)]
    async fn create(&self, request: &StockCreateDBRequest) -> Result<Stock> {
        let mut tables = self.store.tables.write();

        if tables.serial_taken(&request.serial, None) {
            return Err(DbError::StockAlreadyExists {
                serial: request.serial.clone(),
            });
        }
        tables.check_stock_references(
            request.product_id,
            request.provider_id,
            &[
                ("created_by_user_id", request.created_by_user_id),
                ("updated_by_user_id", request.updated_by_user_id),
            ],
        )?;

        let record = StockRecord {
            id: tables.stock_ids.next(),
            product_id: request.product_id,
            serial: request.serial.clone(),
            batch: request.batch.clone(),
            purchase_date: request.purchase_date,
            provider_id: request.provider_id,
            created_by_user_id: request.created_by_user_id,
            updated_by_user_id: request.updated_by_user_id,
            created_at: request.created_at,
            updated_at: request.updated_at,
        };
        let stock = tables.hydrate(&record)?;
        tables.stocks.insert(record.id, record);
        Ok(stock)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: StockId) -> Result<Stock> {
        let tables = self.store.tables.read();
        let record = tables
            .stocks
            .get(&id)
            .ok_or(DbError::StockNotFound { key: StockKey::Id(id) })?;
        tables.hydrate(record)
    }

    #[instrument(skip(self), err)]
    async fn get_by_serial(&self, serial: &str) -> Result<Stock> {
        let tables = self.store.tables.read();
        let record = tables
            .stocks
            .values()
            .find(|s| s.serial == serial)
            .ok_or_else(|| DbError::StockNotFound {
                key: StockKey::Serial(serial.to_string()),
            })?;
        tables.hydrate(record)
    }

    #[instrument(skip(self), err)]
    async fn get_by_product_id(&self, product_id: ProductId) -> Result<Vec<Stock>> {
        let tables = self.store.tables.read();
        tables
            .stocks
            .values()
            .filter(|s| s.product_id == product_id)
            .map(|s| tables.hydrate(s))
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Stock>> {
        let tables = self.store.tables.read();
        tables.stocks.values().map(|s| tables.hydrate(s)).collect()
    }

    #[instrument(skip(self, request), fields(serial = %request.serial), err)]
    async fn update(&self, id: StockId, request: &StockUpdateDBRequest) -> Result<Stock> {
        let mut tables = self.store.tables.write();

        if !tables.stocks.contains_key(&id) {
            return Err(DbError::StockNotFound { key: StockKey::Id(id) });
        }
        if tables.serial_taken(&request.serial, Some(id)) {
            return Err(DbError::StockAlreadyExists {
                serial: request.serial.clone(),
            });
        }
        tables.check_stock_references(
            request.product_id,
            request.provider_id,
            &[("updated_by_user_id", request.updated_by_user_id)],
        )?;

        let record = tables
            .stocks
            .get_mut(&id)
            .ok_or(DbError::StockNotFound { key: StockKey::Id(id) })?;
        record.product_id = request.product_id;
        record.serial = request.serial.clone();
        record.batch = request.batch.clone();
        record.purchase_date = request.purchase_date;
        record.provider_id = request.provider_id;
        record.updated_by_user_id = request.updated_by_user_id;
        record.updated_at = request.updated_at;

        let record = record.clone();
        tables.hydrate(&record)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: StockId) -> Result<()> {
        self.store
            .tables
            .write()
            .stocks
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::StockNotFound { key: StockKey::Id(id) })
    }
}
