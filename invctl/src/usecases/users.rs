//! User account use cases.

use std::sync::Arc;

use tracing::instrument;

use super::now;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::UserRepository;
use crate::db::models::users::{User, UserCreateDBRequest, UserUpdateDBRequest};
use crate::types::UserId;

/// A user account to create
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Changes to a user account. An empty password keeps the current one.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

#[derive(Clone)]
pub struct UserUseCase {
    users: Arc<dyn UserRepository>,
}

impl UserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a user, refusing an email that is already registered.
    ///
    /// The email is looked up first; the unique constraint still catches a concurrent create
    /// that slips in between and reports the same error.
    #[instrument(skip(self, user), fields(email = %user.email), err)]
    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        match self.users.get_by_email(&user.email).await {
            Ok(_) => return Err(DbError::UserAlreadyExists { email: user.email }),
            Err(DbError::UserNotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let now = now();
        self.users
            .create(&UserCreateDBRequest {
                name: user.name,
                email: user.email,
                role: user.role,
                password: user.password,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.users.get_by_id(id).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.users.get_by_email(email).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.users.get_all().await
    }

    #[instrument(skip(self, changes), fields(email = %changes.email), err)]
    pub async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User> {
        let existing = self.users.get_by_id(id).await?;

        let password = if changes.password.is_empty() {
            existing.password
        } else {
            changes.password
        };

        self.users
            .update(
                id,
                &UserUpdateDBRequest {
                    name: changes.name,
                    email: changes.email,
                    role: changes.role,
                    password,
                    updated_at: now(),
                },
            )
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.users.get_by_id(id).await?;
        self.users.delete(id).await
    }
}
