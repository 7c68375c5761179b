//! Database models for products.

use crate::types::ProductId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A catalogue product as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new product
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub name: String,
    pub code: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for rewriting a product
#[derive(Debug, Clone)]
pub struct ProductUpdateDBRequest {
    pub name: String,
    pub code: String,
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}
