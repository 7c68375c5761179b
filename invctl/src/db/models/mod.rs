//! Entity records and write-side requests.
//!
//! Read-side structs are what repositories return. Write-side structs ("DB requests") carry only
//! the columns a statement writes; for stock that means the four foreign-key scalars rather than
//! the hydrated sub-records.
//!
//! - [`products`]: catalogue products, unique by code
//! - [`users`]: user accounts, unique by email
//! - [`providers`]: suppliers, unique by email
//! - [`stocks`]: serialised stock items and the joined [`stocks::Stock`] aggregate

pub mod products;
pub mod providers;
pub mod stocks;
pub mod users;
