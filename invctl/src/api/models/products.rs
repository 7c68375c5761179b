//! API request/response models for products.

use crate::api::models::require;
use crate::db::models::products::Product;
use crate::errors::Error;
use crate::types::ProductId;
use crate::usecases::products::ProductFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductRequest {
    /// Display name
    #[schema(example = "Laptop 14\"")]
    pub name: String,
    /// Catalogue code (must be unique)
    #[schema(example = "LT-14")]
    pub code: String,
    /// Image shown in listings
    #[schema(example = "https://img.example.com/lt-14.png")]
    pub image_url: String,
}

impl TryFrom<ProductRequest> for ProductFields {
    type Error = Error;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        require(&request.name, "name")?;
        require(&request.code, "code")?;
        Ok(ProductFields {
            name: request.name,
            code: request.code,
            image_url: request.image_url,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            code: product.code,
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
