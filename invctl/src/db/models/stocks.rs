//! Database models for stock items.
//!
//! A stock row only stores foreign keys to its product, provider and the two users that created
//! and last updated it. Reads join those tables back in and return the hydrated [`Stock`]
//! aggregate; writes take [`StockCreateDBRequest`] / [`StockUpdateDBRequest`], which carry the
//! bare identifiers.

use crate::db::models::{products::Product, providers::Provider, users::UserSummary};
use crate::types::{ProductId, ProviderId, StockId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stock item with its product, provider, creator and last updater hydrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stock {
    pub id: StockId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product: Product,
    pub created_by_user: UserSummary,
    pub updated_by_user: UserSummary,
    pub provider: Provider,
}

/// Database request for creating a stock item
#[derive(Debug, Clone)]
pub struct StockCreateDBRequest {
    pub product_id: ProductId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub provider_id: ProviderId,
    pub created_by_user_id: UserId,
    pub updated_by_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for rewriting a stock item.
///
/// There is no creator field: who created a stock item is fixed once it exists.
#[derive(Debug, Clone)]
pub struct StockUpdateDBRequest {
    pub product_id: ProductId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub provider_id: ProviderId,
    pub updated_by_user_id: UserId,
    pub updated_at: DateTime<Utc>,
}

/// One row of the stock join, flattened with a column prefix per joined table
#[derive(Debug, Clone, FromRow)]
pub(crate) struct StockRow {
    pub id: StockId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub product_id: ProductId,
    pub product_name: String,
    pub product_code: String,
    pub product_image_url: String,
    pub product_created_at: DateTime<Utc>,
    pub product_updated_at: DateTime<Utc>,

    pub created_by_id: UserId,
    pub created_by_name: String,
    pub created_by_email: String,
    pub created_by_role: String,
    pub created_by_created_at: DateTime<Utc>,
    pub created_by_updated_at: DateTime<Utc>,

    pub updated_by_id: UserId,
    pub updated_by_name: String,
    pub updated_by_email: String,
    pub updated_by_role: String,
    pub updated_by_created_at: DateTime<Utc>,
    pub updated_by_updated_at: DateTime<Utc>,

    pub provider_id: ProviderId,
    pub provider_name: String,
    pub provider_email: String,
    pub provider_phone: String,
    pub provider_address: String,
    pub provider_created_at: DateTime<Utc>,
    pub provider_updated_at: DateTime<Utc>,
}

impl From<StockRow> for Stock {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            serial: row.serial,
            batch: row.batch,
            purchase_date: row.purchase_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                code: row.product_code,
                image_url: row.product_image_url,
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
            },
            created_by_user: UserSummary {
                id: row.created_by_id,
                name: row.created_by_name,
                email: row.created_by_email,
                role: row.created_by_role,
                created_at: row.created_by_created_at,
                updated_at: row.created_by_updated_at,
            },
            updated_by_user: UserSummary {
                id: row.updated_by_id,
                name: row.updated_by_name,
                email: row.updated_by_email,
                role: row.updated_by_role,
                created_at: row.updated_by_created_at,
                updated_at: row.updated_by_updated_at,
            },
            provider: Provider {
                id: row.provider_id,
                name: row.provider_name,
                email: row.provider_email,
                phone: row.provider_phone,
                address: row.provider_address,
                created_at: row.provider_created_at,
                updated_at: row.provider_updated_at,
            },
        }
    }
}
