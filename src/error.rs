use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::store::StoreError;

/// Every failure a request can end with. The `Display` text is what the
/// client sees, so it must stay stable and must not carry internals.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access Denied! No token provided")]
    NoToken,

    #[error("Invalid or Expired Token")]
    InvalidOrExpired,

    #[error("Unauthorized to delete this video")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Persistence(#[source] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateUser | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::NoToken | AppError::InvalidOrExpired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey => AppError::DuplicateUser,
            StoreError::Database(e) => AppError::Persistence(e.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Persistence(cause) = &self {
            error!(error = %cause, "persistence failure");
        }
        let status = self.status_code();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
