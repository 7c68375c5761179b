//! Use cases: the operations the API exposes, layered over the repositories.
//!
//! Each use case owns the business rules that span more than one repository call:
//!
//! - Updates and deletes first confirm the target exists and fail with the entity's not-found
//!   error otherwise, without issuing the write.
//! - Creates and updates stamp `created_at` / `updated_at` here, not in storage.
//!
//! The existence check and the write are separate calls with no transaction around them. If a
//! concurrent delete lands in between, the write itself matches no row and the repository
//! reports the same not-found error, so callers see one outcome either way.
//!
//! Use cases hold their repositories as trait objects and keep no state of their own.

use chrono::{DateTime, SubsecRound, Utc};

pub mod products;
pub mod providers;
pub mod stocks;
pub mod users;

pub use products::ProductUseCase;
pub use providers::ProviderUseCase;
pub use stocks::StockUseCase;
pub use users::UserUseCase;

/// The current time at the microsecond precision the relational backend stores
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
