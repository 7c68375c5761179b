//! # invctl: Inventory Control Service
//!
//! `invctl` keeps track of serialised stock: which product each item is, which provider it was
//! bought from, when, in which batch, and which users registered and last changed it. Products,
//! users and providers are managed through the same REST API.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! is layered the same way for every resource:
//!
//! - The **API layer** ([`api`]) validates JSON requests and turns results into responses.
//! - The **use-case layer** ([`usecases`]) applies the business rules: updates and deletes
//!   check the target exists before writing, and timestamps are stamped here.
//! - The **database layer** ([`db`]) defines one repository trait per entity, with a PostgreSQL
//!   implementation and an in-memory one. Stock reads return the full aggregate with its product,
//!   provider and users joined in, while stock writes only take foreign-key ids.
//!
//! Storage is chosen at startup from [`config::DatabaseConfig`]: process memory, an embedded
//! PostgreSQL server (feature `embedded-db`), or an external PostgreSQL database. Both
//! PostgreSQL variants run the migrations in `migrations/` on startup.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use invctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = invctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     invctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
pub mod types;
pub mod usecases;

use crate::{
    db::{backend::Repositories, embedded::EmbeddedDatabase, in_memory::MemoryStore},
    openapi::ApiDoc,
    usecases::{ProductUseCase, ProviderUseCase, StockUseCase, UserUseCase},
};
use axum::{Router, routing::get};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// Each use case holds its repository as a trait object, so the state is the same whichever
/// storage backend is configured.
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .products(ProductUseCase::new(repositories.products.clone()))
///     .users(UserUseCase::new(repositories.users.clone()))
///     .providers(ProviderUseCase::new(repositories.providers.clone()))
///     .stocks(StockUseCase::new(repositories.stocks.clone()))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub products: ProductUseCase,
    pub users: UserUseCase,
    pub providers: ProviderUseCase,
    pub stocks: StockUseCase,
}

impl AppState {
    /// State with one use case per repository in the bundle
    pub fn with_repositories(config: Config, repositories: &Repositories) -> Self {
        AppState::builder()
            .config(config)
            .products(ProductUseCase::new(repositories.products.clone()))
            .users(UserUseCase::new(repositories.users.clone()))
            .providers(ProviderUseCase::new(repositories.providers.clone()))
            .stocks(StockUseCase::new(repositories.stocks.clone()))
            .build()
    }
}

/// Get the invctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Storage opened for the configured backend.
struct Storage {
    repositories: Repositories,
    pool: Option<PgPool>,
    embedded_db: Option<EmbeddedDatabase>,
}

async fn setup_database(config: &Config) -> anyhow::Result<Storage> {
    let (embedded_db, database_url, pool_settings) = match &config.database {
        config::DatabaseConfig::Memory => {
            info!("Using in-memory storage: data will be lost on shutdown");
            return Ok(Storage {
                repositories: Repositories::in_memory(MemoryStore::new()),
                pool: None,
                embedded_db: None,
            });
        }
        config::DatabaseConfig::Embedded {
            data_dir,
            persistent,
            pool,
        } => {
            info!("Starting with embedded database (persistent: {})", persistent);
            if !persistent {
                info!("persistent=false: database will be ephemeral and data will be lost on shutdown");
            }
            let embedded_db = EmbeddedDatabase::start(data_dir.clone(), *persistent).await?;
            let url = embedded_db.connection_string().to_string();
            (Some(embedded_db), url, pool)
        }
        config::DatabaseConfig::External { url, pool } => {
            info!("Using external database");
            (None, url.clone(), pool)
        }
    };

    let pool = pool_settings.pool_options().connect(&database_url).await?;
    migrator().run(&pool).await?;

    Ok(Storage {
        repositories: Repositories::postgres(pool.clone()),
        pool: Some(pool),
        embedded_db,
    })
}

/// Build the application router: the REST API under `/api`, a health check and the API docs.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/products",
            get(api::handlers::products::list_products).post(api::handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(api::handlers::products::get_product)
                .put(api::handlers::products::update_product)
                .delete(api::handlers::products::delete_product),
        )
        .route(
            "/users",
            get(api::handlers::users::list_users).post(api::handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(api::handlers::users::get_user)
                .put(api::handlers::users::update_user)
                .delete(api::handlers::users::delete_user),
        )
        .route(
            "/providers",
            get(api::handlers::providers::list_providers).post(api::handlers::providers::create_provider),
        )
        .route(
            "/providers/{id}",
            get(api::handlers::providers::get_provider)
                .put(api::handlers::providers::update_provider)
                .delete(api::handlers::providers::delete_provider),
        )
        .route(
            "/stocks",
            get(api::handlers::stocks::list_stocks).post(api::handlers::stocks::create_stock),
        )
        .route(
            "/stocks/{id}",
            get(api::handlers::stocks::get_stock)
                .put(api::handlers::stocks::update_stock)
                .delete(api::handlers::stocks::delete_stock),
        )
        .route(
            "/stocks/product/{product_id}",
            get(api::handlers::stocks::list_stocks_by_product),
        )
        .route("/stocks/serial/{serial}", get(api::handlers::stocks::get_stock_by_serial))
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// The inventory service, from storage setup to graceful shutdown.
///
/// 1. **Create**: [`Application::new`] opens the configured storage and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish, the pool is
///    closed, telemetry is flushed and an embedded database is stopped
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
    embedded_db: Option<EmbeddedDatabase>,
}

impl Application {
    /// Create a new application instance with storage opened and migrated
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting inventory service with configuration: {:#?}", config);

        let storage = setup_database(&config).await?;

        let app_state = AppState::with_repositories(config.clone(), &storage.repositories);

        Ok(Self {
            router: build_router(app_state),
            config,
            pool: storage.pool,
            embedded_db: storage.embedded_db,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Inventory service listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        if let Some(embedded_db) = self.embedded_db {
            info!("Shutting down embedded database...");
            embedded_db.stop().await?;
        }

        Ok(())
    }
}
