//! API request/response models for providers.

use crate::api::models::require;
use crate::db::models::providers::Provider;
use crate::errors::Error;
use crate::types::ProviderId;
use crate::usecases::providers::ProviderFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or replacing a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProviderRequest {
    #[schema(example = "Acme Supplies")]
    pub name: String,
    /// Contact email (must be unique)
    #[schema(example = "sales@acme.example.com")]
    pub email: String,
    #[schema(example = "+1 555 0100")]
    pub phone: String,
    #[schema(example = "1 Industrial Way, Springfield")]
    pub address: String,
}

impl TryFrom<ProviderRequest> for ProviderFields {
    type Error = Error;

    fn try_from(request: ProviderRequest) -> Result<Self, Self::Error> {
        require(&request.name, "name")?;
        require(&request.email, "email")?;
        Ok(ProviderFields {
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderResponse {
    pub id: ProviderId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Provider> for ProviderResponse {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            email: provider.email,
            phone: provider.phone,
            address: provider.address,
            created_at: provider.created_at,
            updated_at: provider.updated_at,
        }
    }
}
