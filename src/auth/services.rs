use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{Credentials, Registration},
        password::{hash_password_async, verify_password_async},
        repo_types::{NewUser, User},
    },
    error::AppError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub async fn register(state: &AppState, input: Registration) -> Result<User, AppError> {
    if state.users.find_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(AppError::DuplicateUser);
    }

    let password_hash = hash_password_async(input.password)
        .await
        .map_err(AppError::Persistence)?;

    // the unique index still catches a concurrent signup with the same email
    let user = state
        .users
        .create(NewUser {
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(state: &AppState, input: Credentials) -> Result<(String, User), AppError> {
    let Some(user) = state.users.find_by_email(&input.email).await? else {
        warn!(email = %input.email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let ok = verify_password_async(input.password, user.password_hash.clone())
        .await
        .map_err(AppError::Persistence)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .jwt
        .issue(user.id, &user.email)
        .map_err(AppError::Persistence)?;

    info!(user_id = %user.id, "user logged in");
    Ok((token, user))
}
