//! Database repository for user accounts.

use crate::db::{
    errors::{DbError, Result, on_unique_violation},
    handlers::repository::UserRepository,
    models::users::{User, UserCreateDBRequest, UserUpdateDBRequest},
};
use crate::types::{UserId, UserKey};
use sqlx::PgPool;
use tracing::instrument;

pub struct Users {
    db: PgPool,
}

impl Users {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UserRepository for Users {
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &UserCreateDBRequest) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.role)
        .bind(&request.password)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::UserAlreadyExists {
                email: request.email.clone(),
            })
        })
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(DbError::UserNotFound { key: UserKey::Id(id) })
    }

    #[instrument(skip(self), err)]
    async fn get_by_email(&self, email: &str) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| DbError::UserNotFound {
                key: UserKey::Email(email.to_string()),
            })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn update(&self, id: UserId, request: &UserUpdateDBRequest) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                role = $4,
                password = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.role)
        .bind(&request.password)
        .bind(request.updated_at)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            on_unique_violation(e, || DbError::UserAlreadyExists {
                email: request.email.clone(),
            })
        })?
        .ok_or(DbError::UserNotFound { key: UserKey::Id(id) })
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: UserId) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound { key: UserKey::Id(id) });
        }
        Ok(())
    }
}
