//! The set of repositories the application runs against.
//!
//! Every backend variant is reduced to the same four trait objects, so the use-case layer is
//! built once regardless of where the data lives.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::handlers::{
    Products, Providers, Stocks, Users,
    repository::{ProductRepository, ProviderRepository, StockRepository, UserRepository},
};
use crate::db::in_memory::{InMemoryProducts, InMemoryProviders, InMemoryStocks, InMemoryUsers, MemoryStore};

/// One repository per entity, all backed by the same storage
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub providers: Arc<dyn ProviderRepository>,
    pub stocks: Arc<dyn StockRepository>,
}

impl Repositories {
    /// Repositories sharing one in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            products: Arc::new(InMemoryProducts::new(store.clone())),
            users: Arc::new(InMemoryUsers::new(store.clone())),
            providers: Arc::new(InMemoryProviders::new(store.clone())),
            stocks: Arc::new(InMemoryStocks::new(store)),
        }
    }

    /// Repositories over a PostgreSQL pool, embedded or external
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            products: Arc::new(Products::new(pool.clone())),
            users: Arc::new(Users::new(pool.clone())),
            providers: Arc::new(Providers::new(pool.clone())),
            stocks: Arc::new(Stocks::new(pool)),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
