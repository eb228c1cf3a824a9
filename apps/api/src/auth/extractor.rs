use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::token;
use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated principal, extracted from the `Authorization: Bearer`
/// header. Handlers take this as an explicit argument and pass the email into
/// every operation; there is no ambient per-request auth context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Invalid Authorization header format");
            AppError::Unauthorized
        })?;

        let email = token::verify(&state.config.jwt_secret, token).map_err(|e| {
            warn!("Token verification failed: {e}");
            AppError::Unauthorized
        })?;

        Ok(AuthUser { email })
    }
}
