use async_trait::async_trait;
use tracing::instrument;

use super::{MemoryStore, still_referenced};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::UserRepository;
use crate::db::models::users::{User, UserCreateDBRequest, UserUpdateDBRequest};
use crate::types::{UserId, UserKey};

/// User repository over a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemoryUsers {
    store: MemoryStore,
}

impl InMemoryUsers {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &UserCreateDBRequest) -> Result<User> {
        let mut tables = self.store.tables.write();

        if tables.users.values().any(|u| u.email == request.email) {
            return Err(DbError::UserAlreadyExists {
                email: request.email.clone(),
            });
        }

        let user = User {
            id: tables.user_ids.next(),
            name: request.name.clone(),
            email: request.email.clone(),
            role: request.role.clone(),
            password: request.password.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        self.store
            .tables
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or(DbError::UserNotFound { key: UserKey::Id(id) })
    }

    #[instrument(skip(self), err)]
    async fn get_by_email(&self, email: &str) -> Result<User> {
        self.store
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DbError::UserNotFound {
                key: UserKey::Email(email.to_string()),
            })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.store.tables.read().users.values().cloned().collect())
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn update(&self, id: UserId, request: &UserUpdateDBRequest) -> Result<User> {
        let mut tables = self.store.tables.write();

        if !tables.users.contains_key(&id) {
            return Err(DbError::UserNotFound { key: UserKey::Id(id) });
        }
        if tables.users.values().any(|u| u.email == request.email && u.id != id) {
            return Err(DbError::UserAlreadyExists {
                email: request.email.clone(),
            });
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or(DbError::UserNotFound { key: UserKey::Id(id) })?;
        user.name = request.name.clone();
        user.email = request.email.clone();
        user.role = request.role.clone();
        user.password = request.password.clone();
        user.updated_at = request.updated_at;
        Ok(user.clone())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: UserId) -> Result<()> {
        let mut tables = self.store.tables.write();

        if !tables.users.contains_key(&id) {
            return Err(DbError::UserNotFound { key: UserKey::Id(id) });
        }
        if let Some(stock) = tables
            .stocks
            .values()
            .find(|s| s.created_by_user_id == id || s.updated_by_user_id == id)
        {
            let column = if stock.created_by_user_id == id {
                "created_by_user_id"
            } else {
                "updated_by_user_id"
            };
            return Err(still_referenced(column, "users", id));
        }

        tables.users.remove(&id);
        Ok(())
    }
}
