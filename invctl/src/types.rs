//! Common type definitions shared by the storage, use-case and API layers.
//!
//! # ID Types
//!
//! Every entity is identified by a backend-generated integer surrogate key. The aliases keep
//! signatures readable and make it obvious which table an identifier points into:
//!
//! - [`ProductId`]: product identifier
//! - [`UserId`]: user account identifier
//! - [`ProviderId`]: supplier identifier
//! - [`StockId`]: stock item identifier
//!
//! # Lookup Keys
//!
//! Users and stock items can be looked up by something other than their identity (email and
//! serial respectively). [`UserKey`] and [`StockKey`] record which key a lookup used, so a
//! not-found error can report it back verbatim.

use serde::Serialize;
use std::fmt;

// Type aliases for IDs
pub type ProductId = i64;
pub type UserId = i64;
pub type ProviderId = i64;
pub type StockId = i64;

/// The key a user lookup was performed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKey {
    Id(UserId),
    Email(String),
}

/// The key a stock lookup was performed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockKey {
    Id(StockId),
    Serial(String),
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKey::Id(id) => write!(f, "ID {id}"),
            UserKey::Email(email) => write!(f, "email {email}"),
        }
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockKey::Id(id) => write!(f, "ID {id}"),
            StockKey::Serial(serial) => write!(f, "serial {serial}"),
        }
    }
}

impl From<UserId> for UserKey {
    fn from(id: UserId) -> Self {
        UserKey::Id(id)
    }
}

impl From<StockId> for StockKey {
    fn from(id: StockId) -> Self {
        StockKey::Id(id)
    }
}
