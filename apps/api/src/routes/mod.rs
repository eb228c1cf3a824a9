pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Account API
        .route("/auth/register", post(auth_handlers::handle_register))
        .route("/auth/login", post(auth_handlers::handle_login))
        // Profile API
        .route("/api/upload", post(profile_handlers::handle_upload))
        .route("/api/profile", get(profile_handlers::handle_get_profile))
        .route(
            "/api/profile/:id",
            get(profile_handlers::handle_get_profile_by_id),
        )
        // Resume PDF API
        .route(
            "/api/resume/download",
            get(profile_handlers::handle_download_own),
        )
        .route(
            "/api/resume/download/:id",
            get(profile_handlers::handle_download),
        )
        .route(
            "/api/resume/update",
            put(profile_handlers::handle_update_resume),
        )
        .with_state(state)
}
