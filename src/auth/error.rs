use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::validator::ValidationError;

/// Failures of the credential store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write (duplicate email).
    #[error("unique constraint violated")]
    Conflict,
    #[error("storage unavailable: {0}")]
    Unavailable(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => StorageError::Unavailable(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body is not a JSON object of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Unknown email or wrong password. Deliberately a single variant.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired session token.
    #[error("not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("crypto failure: {0}")]
    Crypto(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_) | AccountError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::Storage(StorageError::Conflict) => StatusCode::CONFLICT,
            AccountError::Storage(StorageError::Unavailable(_))
            | AccountError::Crypto(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable message sent to the client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AccountError::Validation(e) => e.to_string(),
            AccountError::InvalidBody(_) => "invalid request body".into(),
            AccountError::InvalidCredentials => "invalid email or password".into(),
            AccountError::Unauthenticated => "not authenticated".into(),
            AccountError::Storage(StorageError::Conflict) => "email already registered".into(),
            AccountError::Storage(StorageError::Unavailable(_))
            | AccountError::Crypto(_)
            | AccountError::Internal(_) => "internal server error".into(),
        }
    }
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        AccountError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }
        (status, Json(self.public_message())).into_response()
    }
}
