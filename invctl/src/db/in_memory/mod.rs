//! In-memory storage backend.
//!
//! [`MemoryStore`] holds all four tables behind a single reader/writer lock. Lookups take the
//! shared lock and writes take the exclusive lock, so every repository call is atomic on its
//! own. Nothing spans calls. The store is an ordinary value: build one, then hand clones of it
//! to the repository constructors that should share it.
//!
//! The store enforces the same constraints as the relational schema: unique product codes, user
//! and provider emails, and stock serials; stock references to existing products, providers and
//! users; and no deleting a product, provider or user that a stock item still references.
//! Data is lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::db::errors::{DbError, Result};
use crate::db::models::{
    products::Product,
    providers::Provider,
    stocks::Stock,
    users::{User, UserSummary},
};
use crate::types::{ProductId, ProviderId, StockId, UserId};

mod products;
mod providers;
mod stocks;
mod users;

pub use products::InMemoryProducts;
pub use providers::InMemoryProviders;
pub use stocks::InMemoryStocks;
pub use users::InMemoryUsers;

/// A stored stock row: the foreign keys, not the hydrated aggregate
#[derive(Debug, Clone)]
struct StockRecord {
    id: StockId,
    product_id: ProductId,
    serial: String,
    batch: String,
    purchase_date: Option<NaiveDate>,
    provider_id: ProviderId,
    created_by_user_id: UserId,
    updated_by_user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Identity sequence for one table. Identities start at 1 and are never reused.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    users: BTreeMap<UserId, User>,
    providers: BTreeMap<ProviderId, Provider>,
    stocks: BTreeMap<StockId, StockRecord>,
    product_ids: Sequence,
    user_ids: Sequence,
    provider_ids: Sequence,
    stock_ids: Sequence,
}

/// Shared in-memory tables for the in-memory repositories.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryStore")
            .field("products", &tables.products.len())
            .field("users", &tables.users.len())
            .field("providers", &tables.providers.len())
            .field("stocks", &tables.stocks.len())
            .finish()
    }
}

/// Build the error PostgreSQL reports when a stock column points at a missing row
fn dangling_reference(column: &str, table: &str, id: i64) -> DbError {
    DbError::ForeignKeyViolation {
        constraint: Some(format!("stocks_{column}_fkey")),
        table: Some("stocks".to_string()),
        message: format!("Key ({column})=({id}) is not present in table \"{table}\"."),
    }
}

/// Build the error PostgreSQL reports when deleting a row a stock still points at
fn still_referenced(column: &str, table: &str, id: i64) -> DbError {
    DbError::ForeignKeyViolation {
        constraint: Some(format!("stocks_{column}_fkey")),
        table: Some("stocks".to_string()),
        message: format!("Key (id)=({id}) is still referenced from table \"stocks\" (deleting from \"{table}\")."),
    }
}

impl Tables {
    fn check_stock_references(
        &self,
        product_id: ProductId,
        provider_id: ProviderId,
        user_ids: &[(&str, UserId)],
    ) -> Result<()> {
        if !self.products.contains_key(&product_id) {
            return Err(dangling_reference("product_id", "products", product_id));
        }
        for &(column, user_id) in user_ids {
            if !self.users.contains_key(&user_id) {
                return Err(dangling_reference(column, "users", user_id));
            }
        }
        if !self.providers.contains_key(&provider_id) {
            return Err(dangling_reference("provider_id", "providers", provider_id));
        }
        Ok(())
    }

    fn serial_taken(&self, serial: &str, except: Option<StockId>) -> bool {
        self.stocks
            .values()
            .any(|s| s.serial == serial && Some(s.id) != except)
    }

    /// Join a stock record with the rows it references
    fn hydrate(&self, record: &StockRecord) -> Result<Stock> {
        let dangling = |what: &str, id: i64| {
            DbError::Other(anyhow::anyhow!("stock {} references missing {what} {id}", record.id))
        };
        let product = self
            .products
            .get(&record.product_id)
            .ok_or_else(|| dangling("product", record.product_id))?;
        let created_by = self
            .users
            .get(&record.created_by_user_id)
            .ok_or_else(|| dangling("user", record.created_by_user_id))?;
        let updated_by = self
            .users
            .get(&record.updated_by_user_id)
            .ok_or_else(|| dangling("user", record.updated_by_user_id))?;
        let provider = self
            .providers
            .get(&record.provider_id)
            .ok_or_else(|| dangling("provider", record.provider_id))?;

        Ok(Stock {
            id: record.id,
            serial: record.serial.clone(),
            batch: record.batch.clone(),
            purchase_date: record.purchase_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
            product: product.clone(),
            created_by_user: UserSummary::from(created_by),
            updated_by_user: UserSummary::from(updated_by),
            provider: provider.clone(),
        })
    }
}
