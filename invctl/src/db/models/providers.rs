//! Database models for providers.

use crate::types::ProviderId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A supplier as stored in the `providers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new provider
#[derive(Debug, Clone)]
pub struct ProviderCreateDBRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for rewriting a provider
#[derive(Debug, Clone)]
pub struct ProviderUpdateDBRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub updated_at: DateTime<Utc>,
}
