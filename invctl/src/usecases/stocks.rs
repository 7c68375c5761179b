//! Stock item use cases.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use super::now;
use crate::db::errors::Result;
use crate::db::handlers::repository::StockRepository;
use crate::db::models::stocks::{Stock, StockCreateDBRequest, StockUpdateDBRequest};
use crate::types::{ProductId, ProviderId, StockId, UserId};

/// A stock item to register
#[derive(Debug, Clone)]
pub struct NewStock {
    pub product_id: ProductId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub provider_id: ProviderId,
    pub created_by_user_id: UserId,
}

/// The replacement values for an existing stock item, and who is making the change
#[derive(Debug, Clone)]
pub struct StockChanges {
    pub product_id: ProductId,
    pub serial: String,
    pub batch: String,
    pub purchase_date: Option<NaiveDate>,
    pub provider_id: ProviderId,
    pub updated_by_user_id: UserId,
}

#[derive(Clone)]
pub struct StockUseCase {
    stocks: Arc<dyn StockRepository>,
}

impl StockUseCase {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    /// Register a stock item. Its creator is also recorded as its first updater.
    #[instrument(skip(self, stock), fields(serial = %stock.serial, product_id = stock.product_id), err)]
    pub async fn create_stock(&self, stock: NewStock) -> Result<Stock> {
        let now = now();
        let request = StockCreateDBRequest {
            product_id: stock.product_id,
            serial: stock.serial,
            batch: stock.batch,
            purchase_date: stock.purchase_date,
            provider_id: stock.provider_id,
            created_by_user_id: stock.created_by_user_id,
            updated_by_user_id: stock.created_by_user_id,
            created_at: now,
            updated_at: now,
        };

        self.stocks.create(&request).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_stock(&self, id: StockId) -> Result<Stock> {
        self.stocks.get_by_id(id).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_all_stocks(&self) -> Result<Vec<Stock>> {
        self.stocks.get_all().await
    }

    #[instrument(skip(self), err)]
    pub async fn get_stocks_by_product_id(&self, product_id: ProductId) -> Result<Vec<Stock>> {
        self.stocks.get_by_product_id(product_id).await
    }

    #[instrument(skip(self), err)]
    pub async fn get_stock_by_serial(&self, serial: &str) -> Result<Stock> {
        self.stocks.get_by_serial(serial).await
    }

    #[instrument(skip(self, changes), fields(serial = %changes.serial), err)]
    pub async fn update_stock(&self, id: StockId, changes: StockChanges) -> Result<Stock> {
        self.stocks.get_by_id(id).await?;

        let request = StockUpdateDBRequest {
            product_id: changes.product_id,
            serial: changes.serial,
            batch: changes.batch,
            purchase_date: changes.purchase_date,
            provider_id: changes.provider_id,
            updated_by_user_id: changes.updated_by_user_id,
            updated_at: now(),
        };

        self.stocks.update(id, &request).await
    }

    #[instrument(skip(self), err)]
    pub async fn delete_stock(&self, id: StockId) -> Result<()> {
        self.stocks.get_by_id(id).await?;
        self.stocks.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::Repositories;
    use crate::db::errors::DbError;
    use crate::db::handlers::repository::MockStockRepository;
    use crate::db::in_memory::MemoryStore;
    use crate::db::models::{
        products::ProductCreateDBRequest, providers::ProviderCreateDBRequest, users::UserCreateDBRequest,
    };
    use crate::types::StockKey;

    async fn seeded() -> Repositories {
        let repos = Repositories::in_memory(MemoryStore::new());
        let now = now();
        repos
            .products
            .create(&ProductCreateDBRequest {
                name: "Laptop".to_string(),
                code: "LT-1".to_string(),
                image_url: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        repos
            .providers
            .create(&ProviderCreateDBRequest {
                name: "Acme".to_string(),
                email: "sales@acme.example.com".to_string(),
                phone: String::new(),
                address: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        for email in ["creator@example.com", "editor@example.com"] {
            repos
                .users
                .create(&UserCreateDBRequest {
                    name: email.to_string(),
                    email: email.to_string(),
                    role: "clerk".to_string(),
                    password: "pw".to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }
        repos
    }

    fn new_stock(serial: &str) -> NewStock {
        NewStock {
            product_id: 1,
            serial: serial.to_string(),
            batch: "B1".to_string(),
            purchase_date: None,
            provider_id: 1,
            created_by_user_id: 1,
        }
    }

    fn changes(serial: &str, updated_by_user_id: UserId) -> StockChanges {
        StockChanges {
            product_id: 1,
            serial: serial.to_string(),
            batch: "B2".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            provider_id: 1,
            updated_by_user_id,
        }
    }

    #[tokio::test]
    async fn test_create_stock_example_scenario() {
        let repos = seeded().await;
        let usecase = StockUseCase::new(repos.stocks.clone());

        let stock = usecase.create_stock(new_stock("SN-001")).await.unwrap();
        assert_eq!(stock.id, 1);
        assert_eq!(stock.serial, "SN-001");
        assert_eq!(stock.created_at, stock.updated_at);
        assert_eq!(stock.created_by_user.id, 1);
        assert_eq!(stock.updated_by_user.id, 1);

        match usecase.create_stock(new_stock("SN-001")).await {
            Err(DbError::StockAlreadyExists { serial }) => assert_eq!(serial, "SN-001"),
            other => panic!("expected StockAlreadyExists, got {other:?}"),
        }
        assert_eq!(usecase.get_all_stocks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_stamps_time_and_updater() {
        let repos = seeded().await;
        let usecase = StockUseCase::new(repos.stocks.clone());
        let created = usecase.create_stock(new_stock("SN-1")).await.unwrap();

        let updated = usecase.update_stock(created.id, changes("SN-1b", 2)).await.unwrap();

        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.created_by_user.id, 1);
        assert_eq!(updated.updated_by_user.id, 2);
        assert_eq!(updated.purchase_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(usecase.get_stock_by_serial("SN-1b").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again_is_not_found() {
        let repos = seeded().await;
        let usecase = StockUseCase::new(repos.stocks.clone());
        let created = usecase.create_stock(new_stock("SN-1")).await.unwrap();

        usecase.delete_stock(created.id).await.unwrap();

        assert!(matches!(
            usecase.delete_stock(created.id).await,
            Err(DbError::StockNotFound { key: StockKey::Id(id) }) if id == created.id
        ));
        assert!(matches!(
            usecase.get_stock(created.id).await,
            Err(DbError::StockNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_of_missing_stock_never_writes() {
        let mut mock = MockStockRepository::new();
        mock.expect_get_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|id| Err(DbError::StockNotFound { key: StockKey::Id(id) }));
        mock.expect_update().never();

        let usecase = StockUseCase::new(Arc::new(mock));
        let err = usecase.update_stock(7, changes("SN-7", 1)).await.unwrap_err();

        assert!(matches!(err, DbError::StockNotFound { key: StockKey::Id(7) }));
    }

    #[tokio::test]
    async fn test_delete_of_missing_stock_never_writes() {
        let mut mock = MockStockRepository::new();
        mock.expect_get_by_id()
            .times(1)
            .returning(|id| Err(DbError::StockNotFound { key: StockKey::Id(id) }));
        mock.expect_delete().never();

        let usecase = StockUseCase::new(Arc::new(mock));
        let err = usecase.delete_stock(7).await.unwrap_err();

        assert!(matches!(err, DbError::StockNotFound { key: StockKey::Id(7) }));
    }

    #[tokio::test]
    async fn test_storage_failures_pass_through_unchanged() {
        let mut mock = MockStockRepository::new();
        mock.expect_get_by_product_id()
            .returning(|_| Err(DbError::Other(anyhow::anyhow!("connection reset"))));

        let usecase = StockUseCase::new(Arc::new(mock));
        let err = usecase.get_stocks_by_product_id(1).await.unwrap_err();

        assert!(matches!(err, DbError::Other(_)));
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_lost_race_surfaces_as_not_found_from_the_write() {
        // The row exists at check time but is gone by the time the write runs
        let mut mock = MockStockRepository::new();
        let stock = {
            let repos = seeded().await;
            StockUseCase::new(repos.stocks.clone())
                .create_stock(new_stock("SN-RACE"))
                .await
                .unwrap()
        };
        mock.expect_get_by_id().returning(move |_| Ok(stock.clone()));
        mock.expect_update()
            .times(1)
            .returning(|id, _| Err(DbError::StockNotFound { key: StockKey::Id(id) }));

        let usecase = StockUseCase::new(Arc::new(mock));
        let err = usecase.update_stock(1, changes("SN-RACE", 1)).await.unwrap_err();

        assert!(err.is_not_found());
    }
}
