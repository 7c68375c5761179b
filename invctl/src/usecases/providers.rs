//! Provider use cases.

use std::sync::Arc;

use tracing::instrument;

use super::now;
use crate::db::errors::Result;
use crate::db::handlers::repository::ProviderRepository;
use crate::db::models::providers::{Provider, ProviderCreateDBRequest, ProviderUpdateDBRequest};
use crate::types::ProviderId;

/// The fields of a provider, as supplied on create and (in full) on update
#[derive(Debug, Clone)]
pub struct ProviderFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Clone)]
pub struct ProviderUseCase {
    providers: Arc<dyn ProviderRepository>,
}

impl ProviderUseCase {
    pub fn new(providers: Arc<dyn ProviderRepository>) -> Self {
        Self { providers }
    }

    #[instrument(skip(self, provider), fields(email = %provider.email), err)]
    pub async fn create_provider(&self, provider: ProviderFields) -> Result<Provider> {
        let now = now();
        self.providers
            .create(&ProviderCreateDBRequest {
                name: provider.name,
                email: provider.email,
                phone: provider.phone,
                address: provider.address,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn get_provider(&self, id: ProviderId) -> Result<Provider> {
        self.providers.get_by_id(id).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_all_providers(&self) -> Result<Vec<Provider>> {
        self.providers.get_all().await
    }

    #[instrument(skip(self, provider), fields(email = %provider.email), err)]
    pub async fn update_provider(&self, id: ProviderId, provider: ProviderFields) -> Result<Provider> {
        self.providers.get_by_id(id).await?;

        self.providers
            .update(
                id,
                &ProviderUpdateDBRequest {
                    name: provider.name,
                    email: provider.email,
                    phone: provider.phone,
                    address: provider.address,
                    updated_at: now(),
                },
            )
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn delete_provider(&self, id: ProviderId) -> Result<()> {
        self.providers.get_by_id(id).await?;
        self.providers.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::handlers::repository::MockProviderRepository;
    use crate::db::in_memory::{InMemoryProviders, MemoryStore};

    fn fields(email: &str) -> ProviderFields {
        ProviderFields {
            name: "Globex".to_string(),
            email: email.to_string(),
            phone: "+44 20 7946 0000".to_string(),
            address: "10 Downing Lane".to_string(),
        }
    }

    #[tokio::test]
    async fn test_provider_lifecycle() {
        let usecase = ProviderUseCase::new(Arc::new(InMemoryProviders::new(MemoryStore::new())));

        let created = usecase.create_provider(fields("orders@globex.example.com")).await.unwrap();
        assert_eq!(usecase.get_provider(created.id).await.unwrap(), created);

        let updated = usecase
            .update_provider(created.id, fields("billing@globex.example.com"))
            .await
            .unwrap();
        assert_eq!(updated.email, "billing@globex.example.com");

        usecase.delete_provider(created.id).await.unwrap();
        assert!(usecase.get_all_providers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_provider_is_never_deleted() {
        let mut mock = MockProviderRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Err(DbError::ProviderNotFound { id }));
        mock.expect_delete().never();

        let usecase = ProviderUseCase::new(Arc::new(mock));

        assert!(matches!(
            usecase.delete_provider(11).await,
            Err(DbError::ProviderNotFound { id: 11 })
        ));
    }
}
