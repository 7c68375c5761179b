//! PostgreSQL repository implementations.
//!
//! Each repository owns a clone of the connection pool and implements its entity's trait from
//! [`repository`]. Every method is a single statement, so no repository opens a transaction.
//!
//! - [`Products`]: catalogue products
//! - [`Users`]: user accounts
//! - [`Providers`]: suppliers
//! - [`Stocks`]: stock items, read through a four-table join
//!
//! ```ignore
//! use invctl::db::handlers::{Stocks, repository::StockRepository};
//!
//! async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let stocks = Stocks::new(pool);
//!     let stock = stocks.get_by_serial("SN-001").await?;
//!     println!("{} is a {}", stock.serial, stock.product.name);
//!     Ok(())
//! }
//! ```

pub mod products;
pub mod providers;
pub mod repository;
pub mod stocks;
pub mod users;

pub use products::Products;
pub use providers::Providers;
pub use repository::{ProductRepository, ProviderRepository, StockRepository, UserRepository};
pub use stocks::Stocks;
pub use users::Users;
