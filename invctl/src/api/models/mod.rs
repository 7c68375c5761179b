//! API request and response data models.
//!
//! API models are distinct from the database models: requests are validated and converted into
//! use-case inputs with `TryFrom`, and responses are built from the stored records with `From`.
//! Every model is annotated with `utoipa` for the OpenAPI document.
//!
//! - [`products`]: catalogue products
//! - [`users`]: user accounts (passwords are accepted but never returned)
//! - [`providers`]: suppliers stock is bought from
//! - [`stocks`]: serialised stock items, returned with their product, provider and users inline

pub mod products;
pub mod providers;
pub mod stocks;
pub mod users;

use crate::errors::Error;

/// Reject a blank required field
pub(crate) fn require(value: &str, field: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::bad_request(format!("{field} is required")));
    }
    Ok(())
}

/// Reject a zero or negative reference to another resource
pub(crate) fn require_id(value: i64, field: &str) -> Result<(), Error> {
    if value <= 0 {
        return Err(Error::bad_request(format!("{field} is required")));
    }
    Ok(())
}
