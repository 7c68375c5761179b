//! API request/response models for stock items.

use crate::api::models::{products::ProductResponse, providers::ProviderResponse, require, require_id, users::UserResponse};
use crate::db::models::stocks::Stock;
use crate::errors::Error;
use crate::types::{ProductId, ProviderId, StockId, UserId};
use crate::usecases::stocks::{NewStock, StockChanges};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Request body for registering a stock item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StockCreate {
    #[schema(example = 1)]
    pub product_id: ProductId,
    /// Serial number (must be unique across all stock)
    #[schema(example = "SN-001")]
    pub serial: String,
    #[schema(example = "B-2024-01")]
    pub batch: String,
    /// `YYYY-MM-DD`; empty or missing when unknown
    #[schema(example = "2024-01-31")]
    pub purchase_date: Option<String>,
    #[schema(example = 1)]
    pub provider_id: ProviderId,
    /// The user registering the item, also recorded as its first updater
    #[schema(example = 1)]
    pub created_by_user_id: UserId,
}

/// Request body for replacing a stock item. The original creator is always kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct StockUpdate {
    #[schema(example = 1)]
    pub product_id: ProductId,
    #[schema(example = "SN-001")]
    pub serial: String,
    #[schema(example = "B-2024-02")]
    pub batch: String,
    /// `YYYY-MM-DD`; empty or missing when unknown
    #[schema(example = "2024-02-29")]
    pub purchase_date: Option<String>,
    #[schema(example = 1)]
    pub provider_id: ProviderId,
    #[schema(example = 2)]
    pub updated_by_user_id: UserId,
}

fn parse_purchase_date(value: Option<&str>) -> Result<Option<NaiveDate>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, PURCHASE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| Error::bad_request("Invalid purchase date format")),
    }
}

impl TryFrom<StockCreate> for NewStock {
    type Error = Error;

    fn try_from(request: StockCreate) -> Result<Self, Self::Error> {
        require_id(request.product_id, "product_id")?;
        require(&request.serial, "serial")?;
        require_id(request.provider_id, "provider_id")?;
        require_id(request.created_by_user_id, "created_by_user_id")?;
        let purchase_date = parse_purchase_date(request.purchase_date.as_deref())?;

        Ok(NewStock {
            product_id: request.product_id,
            serial: request.serial,
            batch: request.batch,
            purchase_date,
            provider_id: request.provider_id,
            created_by_user_id: request.created_by_user_id,
        })
    }
}

impl TryFrom<StockUpdate> for StockChanges {
    type Error = Error;

    fn try_from(request: StockUpdate) -> Result<Self, Self::Error> {
        require_id(request.product_id, "product_id")?;
        require(&request.serial, "serial")?;
        require_id(request.provider_id, "provider_id")?;
        require_id(request.updated_by_user_id, "updated_by_user_id")?;
        let purchase_date = parse_purchase_date(request.purchase_date.as_deref())?;

        Ok(StockChanges {
            product_id: request.product_id,
            serial: request.serial,
            batch: request.batch,
            purchase_date,
            provider_id: request.provider_id,
            updated_by_user_id: request.updated_by_user_id,
        })
    }
}

/// A stock item with its product, provider and users inline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockResponse {
    pub id: StockId,
    pub product: ProductResponse,
    pub serial: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_user: UserResponse,
    pub updated_by_user: UserResponse,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub provider: ProviderResponse,
}

impl From<Stock> for StockResponse {
    fn from(stock: Stock) -> Self {
        Self {
            id: stock.id,
            product: stock.product.into(),
            serial: stock.serial,
            created_at: stock.created_at,
            updated_at: stock.updated_at,
            created_by_user: stock.created_by_user.into(),
            updated_by_user: stock.updated_by_user.into(),
            batch: stock.batch,
            purchase_date: stock.purchase_date,
            provider: stock.provider.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> StockCreate {
        StockCreate {
            product_id: 1,
            serial: "SN-001".to_string(),
            batch: "B1".to_string(),
            purchase_date: None,
            provider_id: 1,
            created_by_user_id: 1,
        }
    }

    #[test]
    fn test_zero_ids_are_rejected() {
        for request in [
            StockCreate { product_id: 0, ..create() },
            StockCreate { provider_id: 0, ..create() },
            StockCreate {
                created_by_user_id: 0,
                ..create()
            },
            StockCreate {
                serial: String::new(),
                ..create()
            },
        ] {
            let err = NewStock::try_from(request).unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_purchase_date_parsing() {
        let stock = NewStock::try_from(StockCreate {
            purchase_date: Some("2024-01-31".to_string()),
            ..create()
        })
        .unwrap();
        assert_eq!(stock.purchase_date, NaiveDate::from_ymd_opt(2024, 1, 31));

        let stock = NewStock::try_from(StockCreate {
            purchase_date: Some(String::new()),
            ..create()
        })
        .unwrap();
        assert_eq!(stock.purchase_date, None);

        let err = NewStock::try_from(StockCreate {
            purchase_date: Some("31/01/2024".to_string()),
            ..create()
        })
        .unwrap_err();
        assert_eq!(err.user_message(), "Invalid purchase date format");
    }

    #[test]
    fn test_update_requires_the_updater() {
        let request: StockUpdate =
            serde_json::from_str(r#"{"product_id": 1, "serial": "SN-1", "provider_id": 1}"#).unwrap();
        let err = StockChanges::try_from(request).unwrap_err();
        assert_eq!(err.user_message(), "updated_by_user_id is required");
    }
}
