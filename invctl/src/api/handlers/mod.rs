//! HTTP request handlers for all API endpoints.
//!
//! Handlers are thin: they deserialize and validate the request body into a use-case input,
//! call the use case held in [`crate::AppState`], and wrap the result in a response model.
//! Errors are returned as [`crate::errors::Error`], which maps them to status codes and plain
//! text bodies.
//!
//! - [`products`]: product CRUD
//! - [`users`]: user CRUD
//! - [`providers`]: provider CRUD
//! - [`stocks`]: stock CRUD plus lookups by product and by serial

pub mod products;
pub mod providers;
pub mod stocks;
pub mod users;
