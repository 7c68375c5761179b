use async_trait::async_trait;
use tracing::instrument;

use super::{MemoryStore, still_referenced};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::ProductRepository;
use crate::db::models::products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest};
use crate::types::ProductId;

/// Product repository over a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemoryProducts {
    store: MemoryStore,
}

impl InMemoryProducts {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    #[instrument(skip(self, request), fields(code = %request.code), err)]
    async fn create(&self, request: &ProductCreateDBRequest) -> Result<Product> {
        let mut tables = self.store.tables.write();

        if tables.products.values().any(|p| p.code == request.code) {
            return Err(DbError::ProductAlreadyExists {
                code: request.code.clone(),
            });
        }

        let product = Product {
            id: tables.product_ids.next(),
            name: request.name.clone(),
            code: request.code.clone(),
            image_url: request.image_url.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ProductId) -> Result<Product> {
        self.store
            .tables
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(DbError::ProductNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.store.tables.read().products.values().cloned().collect())
    }

    #[instrument(skip(self, request), fields(code = %request.code), err)]
    async fn update(&self, id: ProductId, request: &ProductUpdateDBRequest) -> Result<Product> {
        let mut tables = self.store.tables.write();

        if !tables.products.contains_key(&id) {
            return Err(DbError::ProductNotFound { id });
        }
        if tables.products.values().any(|p| p.code == request.code && p.id != id) {
            return Err(DbError::ProductAlreadyExists {
                code: request.code.clone(),
            });
        }

        let product = tables.products.get_mut(&id).ok_or(DbError::ProductNotFound { id })?;
        product.name = request.name.clone();
        product.code = request.code.clone();
        product.image_url = request.image_url.clone();
        product.updated_at = request.updated_at;
        Ok(product.clone())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> Result<()> {
        let mut tables = self.store.tables.write();

        if !tables.products.contains_key(&id) {
            return Err(DbError::ProductNotFound { id });
        }
        if tables.stocks.values().any(|s| s.product_id == id) {
            return Err(still_referenced("product_id", "products", id));
        }

        tables.products.remove(&id);
        Ok(())
    }
}
