//! Product use cases.

use std::sync::Arc;

use tracing::instrument;

use super::now;
use crate::db::errors::Result;
use crate::db::handlers::repository::ProductRepository;
use crate::db::models::products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest};
use crate::types::ProductId;

/// The fields of a product, as supplied on create and (in full) on update
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub code: String,
    pub image_url: String,
}

#[derive(Clone)]
pub struct ProductUseCase {
    products: Arc<dyn ProductRepository>,
}

impl ProductUseCase {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    #[instrument(skip(self, product), fields(code = %product.code), err)]
    pub async fn create_product(&self, product: ProductFields) -> Result<Product> {
        let now = now();
        self.products
            .create(&ProductCreateDBRequest {
                name: product.name,
                code: product.code,
                image_url: product.image_url,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.products.get_by_id(id).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        self.products.get_all().await
    }

    #[instrument(skip(self, product), fields(code = %product.code), err)]
    pub async fn update_product(&self, id: ProductId, product: ProductFields) -> Result<Product> {
        self.products.get_by_id(id).await?;

        self.products
            .update(
                id,
                &ProductUpdateDBRequest {
                    name: product.name,
                    code: product.code,
                    image_url: product.image_url,
                    updated_at: now(),
                },
            )
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.products.get_by_id(id).await?;
        self.products.delete(id).await
    }
}
