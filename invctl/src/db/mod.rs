//! Storage layer for data persistence and access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Use cases  │  (usecases - existence checks, timestamps)
//! └──────┬──────┘
//!        │  Arc<dyn ...Repository>
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - PostgreSQL, db::in_memory - MemoryStore)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - records and write requests)
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: repository traits and their PostgreSQL implementations
//! - [`in_memory`]: the same traits over an in-process [`in_memory::MemoryStore`]
//! - [`models`]: entity records and write-side requests
//! - [`errors`]: typed not-found / already-exists errors and driver error classification
//! - [`backend`]: the [`backend::Repositories`] bundle handed to the use cases
//! - [`embedded`]: embedded PostgreSQL lifecycle (optional feature)
//!
//! # Migrations
//!
//! The relational schema lives in `migrations/` and is applied on startup:
//!
//! ```ignore
//! invctl::migrator().run(&pool).await?;
//! ```

pub mod backend;
pub mod embedded;
pub mod errors;
pub mod handlers;
pub mod in_memory;
pub mod models;
