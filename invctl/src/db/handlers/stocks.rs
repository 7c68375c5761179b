//! Database repository for stock items.
//!
//! The `stocks` table only holds foreign keys. Every statement that hands a stock back to the
//! caller joins `products`, `providers` and two aliased copies of `users` (`u1` for the creator,
//! `u2` for the last updater) and returns one flat [`StockRow`] per item, which is then folded
//! into the nested [`Stock`] aggregate.
//!
//! Create and update are a single statement each: the write runs in a CTE whose `RETURNING *`
//! output is joined like a normal read. That keeps the write conditional on the row existing
//! (an update that matches nothing returns no row) and avoids a second round trip to hydrate
//! the result.

use crate::db::{
    errors::{DbError, Result, on_unique_violation},
    handlers::repository::StockRepository,
    models::stocks::{Stock, StockCreateDBRequest, StockRow, StockUpdateDBRequest},
};
use crate::types::{ProductId, StockId, StockKey};
use sqlx::PgPool;
use tracing::instrument;

/// Select list producing a [`StockRow`] from `s` joined per [`stock_joins`]
macro_rules! stock_columns {
    () => {
        r#"
        s.id, s.serial, s.batch, s.purchase_date, s.created_at, s.updated_at,
        p.id AS product_id, p.name AS product_name, p.code AS product_code,
        p.image_url AS product_image_url, p.created_at AS product_created_at,
        p.updated_at AS product_updated_at,
        u1.id AS created_by_id, u1.name AS created_by_name, u1.email AS created_by_email,
        u1.role AS created_by_role, u1.created_at AS created_by_created_at,
        u1.updated_at AS created_by_updated_at,
        u2.id AS updated_by_id, u2.name AS updated_by_name, u2.email AS updated_by_email,
        u2.role AS updated_by_role, u2.created_at AS updated_by_created_at,
        u2.updated_at AS updated_by_updated_at,
        pr.id AS provider_id, pr.name AS provider_name, pr.email AS provider_email,
        pr.phone AS provider_phone, pr.address AS provider_address,
        pr.created_at AS provider_created_at, pr.updated_at AS provider_updated_at
        "#
    };
}

macro_rules! stock_joins {
    () => {
        r#"
        JOIN products p ON p.id = s.product_id
        JOIN users u1 ON u1.id = s.created_by_user_id
        JOIN users u2 ON u2.id = s.updated_by_user_id
        JOIN providers pr ON pr.id = s.provider_id
        "#
    };
}

macro_rules! select_stocks {
    () => {
        concat!("SELECT ", stock_columns!(), " FROM stocks s ", stock_joins!())
    };
}

const INSERT_STOCK: &str = concat!(
    r#"
    WITH s AS (
        INSERT INTO stocks (
            product_id, serial, created_at, updated_at, created_by_user_id,
            updated_by_user_id, batch, purchase_date, provider_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
    )
    SELECT "#,
    stock_columns!(),
    " FROM s ",
    stock_joins!()
);

// The creator is fixed once a stock exists, so created_by_user_id is never in the SET list
const UPDATE_STOCK: &str = concat!(
    r#"
    WITH s AS (
        UPDATE stocks SET
            product_id = $2,
            serial = $3,
            updated_at = $4,
            updated_by_user_id = $5,
            batch = $6,
            purchase_date = $7,
            provider_id = $8
        WHERE id = $1
        RETURNING *
    )
    SELECT "#,
    stock_columns!(),
    " FROM s ",
    stock_joins!()
);

const SELECT_STOCK_BY_ID: &str = concat!(select_stocks!(), " WHERE s.id = $1");
const SELECT_STOCK_BY_SERIAL: &str = concat!(select_stocks!(), " WHERE s.serial = $1");
const SELECT_STOCKS_BY_PRODUCT: &str = concat!(select_stocks!(), " WHERE s.product_id = $1 ORDER BY s.id");
const SELECT_ALL_STOCKS: &str = concat!(select_stocks!(), " ORDER BY s.id");

pub struct Stocks {
    db: PgPool,
}

impl Stocks {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl StockRepository for Stocks {
    #[instrument(skip(self, request), fields(serial = %request.serial, product_id = request.product_id), err)]
    async fn create(&self, request: &StockCreateDBRequest) -> Result<Stock> {
        let row = sqlx::query_as::<_, StockRow>(INSERT_STOCK)
            .bind(request.product_id)
            .bind(&request.serial)
            .bind(request.created_at)
            .bind(request.updated_at)
            .bind(request.created_by_user_id)
            .bind(request.updated_by_user_id)
            .bind(&request.batch)
            .bind(request.purchase_date)
            .bind(request.provider_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                on_unique_violation(e, || DbError::StockAlreadyExists {
                    serial: request.serial.clone(),
                })
            })?;

        Ok(Stock::from(row))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: StockId) -> Result<Stock> {
        sqlx::query_as::<_, StockRow>(SELECT_STOCK_BY_ID)
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .map(Stock::from)
            .ok_or(DbError::StockNotFound { key: StockKey::Id(id) })
    }

    #[instrument(skip(self), err)]
    async fn get_by_serial(&self, serial: &str) -> Result<Stock> {
        sqlx::query_as::<_, StockRow>(SELECT_STOCK_BY_SERIAL)
            .bind(serial)
            .fetch_optional(&self.db)
            .await?
            .map(Stock::from)
            .ok_or_else(|| DbError::StockNotFound {
                key: StockKey::Serial(serial.to_string()),
            })
    }

    #[instrument(skip(self), err)]
    async fn get_by_product_id(&self, product_id: ProductId) -> Result<Vec<Stock>> {
        let rows = sqlx::query_as::<_, StockRow>(SELECT_STOCKS_BY_PRODUCT)
            .bind(product_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Stock::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn get_all(&self) -> Result<Vec<Stock>> {
        let rows = sqlx::query_as::<_, StockRow>(SELECT_ALL_STOCKS)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Stock::from).collect())
    }

    #[instrument(skip(self, request), fields(serial = %request.serial), err)]
    async fn update(&self, id: StockId, request: &StockUpdateDBRequest) -> Result<Stock> {
        sqlx::query_as::<_, StockRow>(UPDATE_STOCK)
            .bind(id)
            .bind(request.product_id)
            .bind(&request.serial)
            .bind(request.updated_at)
            .bind(request.updated_by_user_id)
            .bind(&request.batch)
            .bind(request.purchase_date)
            .bind(request.provider_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                on_unique_violation(e, || DbError::StockAlreadyExists {
                    serial: request.serial.clone(),
                })
            })?
            .map(Stock::from)
            .ok_or(DbError::StockNotFound { key: StockKey::Id(id) })
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: StockId) -> Result<()> {
        let result = sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::StockNotFound { key: StockKey::Id(id) });
        }
        Ok(())
    }
}
