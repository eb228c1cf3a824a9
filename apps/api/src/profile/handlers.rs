//! Axum route handlers for profile upload/retrieval, resume update, and PDF
//! download.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::ingest::{self, UpdateResumeRequest, UploadRequest};
use crate::models::profile::Profile;
use crate::profile::view::{OwnProfileView, ProfileView};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UpdateResumeResponse {
    pub message: String,
    pub profile: ProfileView,
}

/// POST /api/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UploadRequest>,
) -> Result<Json<ProfileView>, AppError> {
    let profile = ingest::upload_and_ingest(&state, &user.email, req).await?;
    Ok(Json(ProfileView::from(&profile)))
}

/// GET /api/profile
///
/// The only endpoint that returns the raw parsed resume JSON.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<OwnProfileView>, AppError> {
    let profile = state
        .profiles
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(OwnProfileView::from(&profile)))
}

/// GET /api/profile/:id
pub async fn handle_get_profile_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ProfileView>, AppError> {
    let profile = state
        .profiles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;

    if profile.email != user.email {
        return Err(AppError::Forbidden);
    }

    Ok(Json(ProfileView::from(&profile)))
}

/// PUT /api/resume/update
pub async fn handle_update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<UpdateResumeResponse>, AppError> {
    let profile = ingest::update_resume(&state, &user.email, req).await?;
    Ok(Json(UpdateResumeResponse {
        message: "Resume updated".to_string(),
        profile: ProfileView::from(&profile),
    }))
}

/// GET /api/resume/download/:id
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let profile = state
        .profiles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    pdf_attachment(profile)
}

/// GET /api/resume/download
///
/// Same semantics as the by-id variant, for the caller's own resume.
pub async fn handle_download_own(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, AppError> {
    let profile = state
        .profiles
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    pdf_attachment(profile)
}

/// Fixed PDF content type, attachment filename derived from the record id,
/// and forced revalidation.
fn pdf_attachment(profile: Profile) -> Result<Response, AppError> {
    let pdf = profile
        .resume_pdf
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", profile.id)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"resume_{}.pdf\"", profile.id),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, must-revalidate".to_string(),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
