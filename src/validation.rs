use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

/// Turns a loosely-typed request body into its checked form.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, AppError>;
}

/// JSON body extractor that runs `Validate` before the handler sees it.
/// Both malformed JSON and failed checks reject with `AppError::Validation`.
pub struct ValidatedJson<T: Validate>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned + Send,
    T::Valid: Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "rejected request body");
            AppError::validation("Invalid request body")
        })?;
        Ok(ValidatedJson(body.validate()?))
    }
}

/// Trimmed value of a required text field, `None` when absent or blank.
pub fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Path ids arrive as strings so a malformed one maps to a validation error.
pub fn parse_id(raw: &str, message: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation(message))
}
