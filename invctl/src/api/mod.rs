//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! All resources live under `/api`:
//!
//! - **Products** (`/api/products/*`): catalogue entries, unique by code
//! - **Users** (`/api/users/*`): accounts, unique by email
//! - **Providers** (`/api/providers/*`): suppliers, unique by email
//! - **Stock** (`/api/stocks/*`): serialised items, unique by serial, also listed by product
//!   (`/api/stocks/product/{product_id}`) and found by serial (`/api/stocks/serial/{serial}`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. API documentation is available at `/docs` when
//! the server is running.

pub mod handlers;
pub mod models;
