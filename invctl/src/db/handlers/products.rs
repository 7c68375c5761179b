//! Database repository for products.

use crate::db::{
    errors::{DbError, Result, on_unique_violation},
    handlers::repository::ProductRepository,
    models::products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest},
};
use crate::types::ProductId;
use sqlx::PgPool;
use tracing::instrument;

pub struct Products {
    db: PgPool,
}

impl Products {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ProductRepository for Products {
    #[instrument(skip(self, request), fields(code = %request.code), err)]
    async fn create(&self, request: &ProductCreateDBRequest) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, code, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.code)
        .bind(&request.image_url)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::ProductAlreadyExists {
                code: request.code.clone(),
            })
        })
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ProductId) -> Result<Product> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DbError::ProductNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(products)
    }

    #[instrument(skip(self, request), fields(code = %request.code), err)]
    async fn update(&self, id: ProductId, request: &ProductUpdateDBRequest) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = $2,
                code = $3,
                image_url = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.code)
        .bind(&request.image_url)
        .bind(request.updated_at)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::ProductAlreadyExists {
                code: request.code.clone(),
            })
        })?
        .ok_or(DbError::ProductNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::ProductNotFound { id });
        }
        Ok(())
    }
}
