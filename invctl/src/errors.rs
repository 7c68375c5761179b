use crate::db::errors::DbError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data, rejected before it reaches a use case
    #[error("{message}")]
    BadRequest { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::ProductNotFound { .. }
                | DbError::UserNotFound { .. }
                | DbError::ProviderNotFound { .. }
                | DbError::StockNotFound { .. } => StatusCode::NOT_FOUND,
                DbError::ProductAlreadyExists { .. }
                | DbError::UserAlreadyExists { .. }
                | DbError::ProviderAlreadyExists { .. }
                | DbError::StockAlreadyExists { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::ForeignKeyViolation { constraint, .. } => match constraint.as_deref() {
                    Some("stocks_product_id_fkey") => "Referenced product does not exist or is still in use".to_string(),
                    Some("stocks_provider_id_fkey") => "Referenced provider does not exist or is still in use".to_string(),
                    Some("stocks_created_by_user_id_fkey") | Some("stocks_updated_by_user_id_fkey") => {
                        "Referenced user does not exist or is still in use".to_string()
                    }
                    _ => "Invalid reference to related resource".to_string(),
                },
                DbError::Other(_) => "Internal server error".to_string(),
                // Not-found and already-exists messages only carry the key the caller sent
                other => other.to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Error::bad_request("Invalid request body")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::ForeignKeyViolation { .. }) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Database(db_err) if db_err.is_already_exists() => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Database(_) | Error::BadRequest { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StockKey, UserKey};
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::bad_request("name is required"), StatusCode::BAD_REQUEST),
            (DbError::ProductNotFound { id: 1 }.into(), StatusCode::NOT_FOUND),
            (
                DbError::UserNotFound {
                    key: UserKey::Email("x@y.z".to_string()),
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (DbError::ProviderNotFound { id: 3 }.into(), StatusCode::NOT_FOUND),
            (DbError::StockNotFound { key: StockKey::Id(4) }.into(), StatusCode::NOT_FOUND),
            (
                DbError::ProductAlreadyExists { code: "P1".to_string() }.into(),
                StatusCode::CONFLICT,
            ),
            (
                DbError::UserAlreadyExists {
                    email: "a@b.c".to_string(),
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                DbError::ProviderAlreadyExists {
                    email: "p@b.c".to_string(),
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                DbError::StockAlreadyExists {
                    serial: "SN-1".to_string(),
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (
                DbError::ForeignKeyViolation {
                    constraint: None,
                    table: None,
                    message: String::new(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                DbError::Other(anyhow::anyhow!("connection reset")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                Error::Internal {
                    operation: "start".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err:?}");
        }
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let err: Error = DbError::Other(anyhow::anyhow!("password authentication failed for user postgres")).into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }

    #[tokio::test]
    async fn test_conflict_body_names_the_duplicate_value() {
        let err: Error = DbError::StockAlreadyExists {
            serial: "SN-001".to_string(),
        }
        .into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_text(response).await, "stock with serial SN-001 already exists");
    }

    #[test]
    fn test_foreign_key_message_names_the_relation() {
        let err: Error = DbError::ForeignKeyViolation {
            constraint: Some("stocks_provider_id_fkey".to_string()),
            table: Some("stocks".to_string()),
            message: "Key (provider_id)=(9) is not present".to_string(),
        }
        .into();

        assert_eq!(
            err.user_message(),
            "Referenced provider does not exist or is still in use"
        );
    }
}
