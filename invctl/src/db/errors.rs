use crate::types::{ProductId, ProviderId, StockKey, UserKey};
use thiserror::Error;

/// Unified error type for repository operations that application code can handle.
///
/// Not-found and already-exists conditions are typed per entity and carry the key that was
/// looked up or the unique value that collided. Everything the storage layer does not
/// specifically recognise is carried opaquely in [`DbError::Other`].
#[derive(Error, Debug)]
pub enum DbError {
    #[error("product with ID {id} not found")]
    ProductNotFound { id: ProductId },

    #[error("product with code {code} already exists")]
    ProductAlreadyExists { code: String },

    #[error("user with {key} not found")]
    UserNotFound { key: UserKey },

    #[error("user with email {email} already exists")]
    UserAlreadyExists { email: String },

    #[error("provider with ID {id} not found")]
    ProviderNotFound { id: ProviderId },

    #[error("provider with email {email} already exists")]
    ProviderAlreadyExists { email: String },

    #[error("stock with {key} not found")]
    StockNotFound { key: StockKey },

    #[error("stock with serial {serial} already exists")]
    StockAlreadyExists { serial: String },

    /// A write referenced a row that does not exist, or a delete would orphan referencing rows
    #[error("Foreign key constraint violation")]
    ForeignKeyViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    /// Whether this error reports a missing row, for any entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DbError::ProductNotFound { .. }
                | DbError::UserNotFound { .. }
                | DbError::ProviderNotFound { .. }
                | DbError::StockNotFound { .. }
        )
    }

    /// Whether this error reports a uniqueness conflict, for any entity.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            DbError::ProductAlreadyExists { .. }
                | DbError::UserAlreadyExists { .. }
                | DbError::ProviderAlreadyExists { .. }
                | DbError::StockAlreadyExists { .. }
        )
    }
}

/// Backend-neutral classification of a storage driver failure.
///
/// Repositories only translate [`StorageFailure::NoRows`] and
/// [`StorageFailure::UniqueViolation`] into entity errors, because only they know which entity
/// and key were involved. Everything else goes through `From<StorageFailure> for DbError`.
#[derive(Debug)]
pub enum StorageFailure {
    /// The statement produced no row where one was required
    NoRows,
    /// A unique constraint rejected the write
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write or delete
    ForeignKeyViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },
    /// Anything else, passed through unchanged
    Other(sqlx::Error),
}

impl From<sqlx::Error> for StorageFailure {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StorageFailure::NoRows,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StorageFailure::UniqueViolation {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                    }
                } else if db_err.is_foreign_key_violation() {
                    StorageFailure::ForeignKeyViolation {
                        constraint: db_err.constraint().map(|s| s.to_string()),
                        table: db_err.table().map(|s| s.to_string()),
                        message: db_err.message().to_string(),
                    }
                } else {
                    StorageFailure::Other(err)
                }
            }
            _ => StorageFailure::Other(err),
        }
    }
}

impl From<StorageFailure> for DbError {
    fn from(failure: StorageFailure) -> Self {
        match failure {
            StorageFailure::ForeignKeyViolation { constraint, table, message } => {
                DbError::ForeignKeyViolation { constraint, table, message }
            }
            // An unexpected empty result or a uniqueness conflict nobody claimed is not a
            // domain condition at this point
            StorageFailure::NoRows => DbError::Other(anyhow::Error::from(sqlx::Error::RowNotFound)),
            StorageFailure::UniqueViolation { constraint } => DbError::Other(anyhow::anyhow!(
                "unexpected unique constraint violation ({})",
                constraint.as_deref().unwrap_or("unnamed")
            )),
            StorageFailure::Other(err) => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Convert from sqlx::Error for call sites with no entity-specific translation
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        StorageFailure::from(err).into()
    }
}

/// Translate a driver error raised by a write, turning a uniqueness conflict into the
/// entity's already-exists error.
pub(crate) fn on_unique_violation(err: sqlx::Error, conflict: impl FnOnce() -> DbError) -> DbError {
    match StorageFailure::from(err) {
        StorageFailure::UniqueViolation { .. } => conflict(),
        other => other.into(),
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_classified_as_no_rows() {
        assert!(matches!(StorageFailure::from(sqlx::Error::RowNotFound), StorageFailure::NoRows));
    }

    #[test]
    fn test_unclassified_errors_pass_through_as_other() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Other(_)));
        assert!(!err.is_not_found());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_on_unique_violation_leaves_other_errors_alone() {
        let err = on_unique_violation(sqlx::Error::PoolClosed, || DbError::StockAlreadyExists {
            serial: "SN-001".to_string(),
        });
        assert!(matches!(err, DbError::Other(_)));
    }

    #[test]
    fn test_not_found_messages_carry_lookup_key() {
        let by_id = DbError::StockNotFound { key: StockKey::Id(7) };
        let by_serial = DbError::StockNotFound {
            key: StockKey::Serial("SN-9".to_string()),
        };
        assert_eq!(by_id.to_string(), "stock with ID 7 not found");
        assert_eq!(by_serial.to_string(), "stock with serial SN-9 not found");
        assert!(by_id.is_not_found());

        let user = DbError::UserNotFound {
            key: UserKey::Email("a@b.c".to_string()),
        };
        assert_eq!(user.to_string(), "user with email a@b.c not found");
    }
}
