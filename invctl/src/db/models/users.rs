//! Database models for users.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user account as stored in the `users` table.
///
/// The password is stored as given and never leaves the service: it is skipped on
/// serialization and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// The user columns nested inside a stock aggregate (creator and last updater)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for rewriting a user.
///
/// Callers resolve the "keep the old password" rule before building this, so every field is
/// written as given.
#[derive(Debug, Clone)]
pub struct UserUpdateDBRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub updated_at: DateTime<Utc>,
}
