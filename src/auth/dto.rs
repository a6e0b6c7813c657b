use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{repo_types::User, services::is_valid_email},
    error::AppError,
    validation::{required, Validate},
};

/// Request body for registration. Fields are optional so that a missing
/// one reports as a validation error rather than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration input after trimming and checks.
#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    type Valid = Registration;

    fn validate(self) -> Result<Registration, AppError> {
        let (Some(username), Some(email), Some(password)) = (
            required(self.username),
            required(self.email),
            required(self.password),
        ) else {
            return Err(AppError::validation("Please fill all fields"));
        };
        if !is_valid_email(&email) {
            return Err(AppError::validation("Invalid email"));
        }
        Ok(Registration {
            username,
            email,
            password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Valid = Credentials;

    fn validate(self) -> Result<Credentials, AppError> {
        match (required(self.email), self.password.filter(|p| !p.is_empty())) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(AppError::validation("Please fill all fields")),
        }
    }
}

/// Response returned after signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub data: User,
    pub message: &'static str,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
