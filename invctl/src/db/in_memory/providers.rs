use async_trait::async_trait;
use tracing::instrument;

use super::{MemoryStore, still_referenced};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::ProviderRepository;
use crate::db::models::providers::{Provider, ProviderCreateDBRequest, ProviderUpdateDBRequest};
use crate::types::ProviderId;

/// Provider repository over a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct InMemoryProviders {
    store: MemoryStore,
}

impl InMemoryProviders {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviders {
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &ProviderCreateDBRequest) -> Result<Provider> {
        let mut tables = self.store.tables.write();

        if tables.providers.values().any(|p| p.email == request.email) {
            return Err(DbError::ProviderAlreadyExists {
                email: request.email.clone(),
            });
        }

        let provider = Provider {
            id: tables.provider_ids.next(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            address: request.address.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        };
        tables.providers.insert(provider.id, provider.clone());
        Ok(provider)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: ProviderId) -> Result<Provider> {
        self.store
            .tables
            .read()
            .providers
            .get(&id)
            .cloned()
            .ok_or(DbError::ProviderNotFound { id })
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Provider>> {
        Ok(self.store.tables.read().providers.values().cloned().collect())
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn update(&self, id: ProviderId, request: &ProviderUpdateDBRequest) -> Result<Provider> {
        let mut tables = self.store.tables.write();

        if !tables.providers.contains_key(&id) {
            return Err(DbError::ProviderNotFound { id });
        }
        if tables.providers.values().any(|p| p.email == request.email && p.id != id) {
            return Err(DbError::ProviderAlreadyExists {
                email: request.email.clone(),
            });
        }

        let provider = tables.providers.get_mut(&id).ok_or(DbError::ProviderNotFound { id })?;
        provider.name = request.name.clone();
        provider.email = request.email.clone();
        provider.phone = request.phone.clone();
        provider.address = request.address.clone();
        provider.updated_at = request.updated_at;
        Ok(provider.clone())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProviderId) -> Result<()> {
        let mut tables = self.store.tables.write();

        if !tables.providers.contains_key(&id) {
            return Err(DbError::ProviderNotFound { id });
        }
        if tables.stocks.values().any(|s| s.provider_id == id) {
            return Err(still_referenced("provider_id", "providers", id));
        }

        tables.providers.remove(&id);
        Ok(())
    }
}
