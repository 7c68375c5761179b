//! Database repository for providers.

use crate::db::{
    errors::{DbError, Result, on_unique_violation},
    handlers::repository::ProviderRepository,
    models::providers::{Provider, ProviderCreateDBRequest, ProviderUpdateDBRequest},
};
use crate::types::ProviderId;
use sqlx::PgPool;
use tracing::instrument;

pub struct Providers {
    db: PgPool,
}

impl Providers {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ProviderRepository for Providers {
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &ProviderCreateDBRequest) -> Result<Provider> {
        sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (name, email, phone, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::ProviderAlreadyExists {
                email: request.email.clone(),
            })
        })
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ProviderId) -> Result<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DbError::ProviderNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Provider>> {
        let providers = sqlx::query_as::<_, Provider>("SELECT * FROM providers ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(providers)
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn update(&self, id: ProviderId, request: &ProviderUpdateDBRequest) -> Result<Provider> {
        sqlx::query_as::<_, Provider>(
            r#"
            UPDATE providers SET
                name = $2,
                email = $3,
                phone = $4,
                address = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(request.updated_at)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::ProviderAlreadyExists {
                email: request.email.clone(),
            })
        })?
        .ok_or(DbError::ProviderNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProviderId) -> Result<()> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::ProviderNotFound { id });
        }
        Ok(())
    }
}
