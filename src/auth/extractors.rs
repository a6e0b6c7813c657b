use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys};
use crate::error::AppError;

/// Identity of the caller, established from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        authenticate(&parts.headers, &keys).map(AuthUser)
    }
}

/// Missing or empty header is `NoToken`; anything else that fails
/// verification is `InvalidOrExpired`, whitespace-only values included.
pub fn authenticate(headers: &HeaderMap, keys: &JwtKeys) -> Result<Claims, AppError> {
    let raw = match headers.get(AUTHORIZATION) {
        None => return Err(AppError::NoToken),
        Some(value) => value.to_str().map_err(|_| AppError::InvalidOrExpired)?,
    };
    if raw.is_empty() {
        return Err(AppError::NoToken);
    }

    // The scheme is conventional, a bare token is accepted too.
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::InvalidOrExpired
    })
}
