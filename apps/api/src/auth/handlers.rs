//! Axum route handlers for registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{password, token};
use crate::errors::AppError;
use crate::ingest::{self, RegisterRequest};
use crate::profile::view::ProfileView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileView>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub profile: ProfileView,
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let outcome = ingest::register_and_ingest(&state, req).await?;
    Ok(Json(RegisterResponse {
        message: "Registered successfully".to_string(),
        token: outcome.token,
        profile: ProfileView::from(&outcome.profile),
    }))
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, supplied_password) = match (req.email, req.password) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(AppError::Validation(
                "Email and password required".to_string(),
            ))
        }
    };

    let account = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify_password(&supplied_password, &account.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = token::issue(&state.config.jwt_secret, &account.email)?;

    // The profile saved during registration, if it is still around.
    let profile = state.profiles.find_by_email(&account.email).await?;

    Ok(Json(LoginResponse {
        token,
        profile: profile.as_ref().map(ProfileView::from),
    }))
}
