//! Repository traits for database operations.
//!
//! A repository is the data access layer for one entity. Every storage backend (PostgreSQL,
//! embedded PostgreSQL, or the in-memory [`MemoryStore`](crate::db::in_memory::MemoryStore))
//! implements the same traits, so the layers above hold them as `Arc<dyn ...>` and never know
//! which backend they are talking to.
//!
//! The contract is the same for every entity:
//!
//! - `create` returns the persisted record, with its generated identity and stored timestamps.
//! - `get_by_id` (and the other single-row lookups) signal absence with the entity's typed
//!   not-found error, never with an empty `Ok`.
//! - `get_all` lists in ascending identity order.
//! - `update` and `delete` on a missing row return the not-found error; a write that collides
//!   with a unique value returns the entity's already-exists error.
//! - Any other storage failure is passed through as [`DbError::Other`](crate::db::errors::DbError).

use crate::db::errors::Result;
use crate::db::models::{
    products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest},
    providers::{Provider, ProviderCreateDBRequest, ProviderUpdateDBRequest},
    stocks::{Stock, StockCreateDBRequest, StockUpdateDBRequest},
    users::{User, UserCreateDBRequest, UserUpdateDBRequest},
};
use crate::types::{ProductId, ProviderId, StockId, UserId};

#[cfg(test)]
use mockall::automock;

/// Data access for products
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, request: &ProductCreateDBRequest) -> Result<Product>;

    async fn get_by_id(&self, id: ProductId) -> Result<Product>;

    async fn get_all(&self) -> Result<Vec<Product>>;

    async fn update(&self, id: ProductId, request: &ProductUpdateDBRequest) -> Result<Product>;

    async fn delete(&self, id: ProductId) -> Result<()>;
}

/// Data access for user accounts
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, request: &UserCreateDBRequest) -> Result<User>;

    async fn get_by_id(&self, id: UserId) -> Result<User>;

    /// Look a user up by their (unique) email address
    async fn get_by_email(&self, email: &str) -> Result<User>;

    async fn get_all(&self) -> Result<Vec<User>>;

    async fn update(&self, id: UserId, request: &UserUpdateDBRequest) -> Result<User>;

    async fn delete(&self, id: UserId) -> Result<()>;
}

/// Data access for providers
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn create(&self, request: &ProviderCreateDBRequest) -> Result<Provider>;

    async fn get_by_id(&self, id: ProviderId) -> Result<Provider>;

    async fn get_all(&self) -> Result<Vec<Provider>>;

    async fn update(&self, id: ProviderId, request: &ProviderUpdateDBRequest) -> Result<Provider>;

    async fn delete(&self, id: ProviderId) -> Result<()>;
}

/// Data access for stock items.
///
/// Writes take foreign-key-only requests; every read, and the result of every write, is the
/// hydrated [`Stock`] aggregate.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StockRepository: Send + Sync {
    async fn create(&self, request: &StockCreateDBRequest) -> Result<Stock>;

    async fn get_by_id(&self, id: StockId) -> Result<Stock>;

    async fn get_by_serial(&self, serial: &str) -> Result<Stock>;

    /// All stock items of one product, in ascending identity order
    async fn get_by_product_id(&self, product_id: ProductId) -> Result<Vec<Stock>>;

    async fn get_all(&self) -> Result<Vec<Stock>>;

    async fn update(&self, id: StockId, request: &StockUpdateDBRequest) -> Result<Stock>;

    async fn delete(&self, id: StockId) -> Result<()>;
}
