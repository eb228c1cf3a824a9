//! The resume ingestion pipeline: validate input → call the parser → decode
//! the optional PDF → upsert the profile → best-effort downstream
//! notification. Registration additionally owns account creation and the
//! compensating delete when ingestion fails afterwards.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use metrics::counter;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{password, token};
use crate::config::OmittedFields;
use crate::errors::AppError;
use crate::models::profile::{DescriptiveFields, Profile};
use crate::parser::{ResumeParser, EMPTY_RESUME_JSON};
use crate::state::AppState;
use crate::store::NewProfile;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "resumeText", alias = "resume_text")]
    pub resume_text: String,
    #[serde(default, rename = "resumePdf", alias = "resume_pdf")]
    pub resume_pdf: Option<String>,
    #[serde(flatten)]
    pub fields: DescriptiveFields,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default, rename = "resumeText", alias = "resume_text")]
    pub resume_text: String,
    #[serde(default, rename = "resumePdf", alias = "resume_pdf")]
    pub resume_pdf: Option<String>,
    #[serde(flatten)]
    pub fields: DescriptiveFields,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    #[serde(default, rename = "resumeText", alias = "resume_text")]
    pub resume_text: String,
    #[serde(default, rename = "resumePdf", alias = "resume_pdf")]
    pub resume_pdf: Option<String>,
}

#[derive(Debug)]
pub struct RegisterOutcome {
    pub token: String,
    pub profile: Profile,
}

/// Registration: account creation plus first ingestion. If the profile never
/// makes it to the store, the freshly created account is deleted again
/// (best-effort) and the whole operation reports a server error.
pub async fn register_and_ingest(
    state: &AppState,
    req: RegisterRequest,
) -> Result<RegisterOutcome, AppError> {
    if req.email.trim().is_empty() || req.password.trim().is_empty() {
        return Err(AppError::Validation(
            "Email and password required".to_string(),
        ));
    }

    // Fast-path duplicate lookup so an existing email conflicts regardless of
    // what else is in the payload. The atomic insert below stays the
    // authoritative guard under concurrency.
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resumeText is required".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    if !state
        .users
        .create_if_absent(&req.email, &password_hash)
        .await?
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let profile = match ingest_profile(
        state,
        &req.email,
        &req.resume_text,
        req.resume_pdf.as_deref(),
        req.fields,
        OmittedFields::Clear,
    )
    .await
    {
        Ok(profile) => profile,
        Err(e) => {
            // Compensating delete. Its own failure is recorded, never surfaced.
            if let Err(del_err) = state.users.delete(&req.email).await {
                warn!(
                    "compensating account delete failed for {}: {del_err}",
                    req.email
                );
                counter!("register_compensation_failures_total").increment(1);
            }
            return Err(e);
        }
    };

    notify_profile_saved(state, &profile).await;

    let token = token::issue(&state.config.jwt_secret, &req.email)?;
    info!("registered account {}", req.email);

    Ok(RegisterOutcome { token, profile })
}

/// Upload for an already-authenticated caller: same parse/decode logic as
/// registration, no account handling, always upserts. What happens to
/// descriptive fields the caller omitted is the `UPLOAD_OMITTED_FIELDS`
/// configuration choice.
pub async fn upload_and_ingest(
    state: &AppState,
    email: &str,
    req: UploadRequest,
) -> Result<Profile, AppError> {
    let profile = ingest_profile(
        state,
        email,
        &req.resume_text,
        req.resume_pdf.as_deref(),
        req.fields,
        state.config.omitted_fields,
    )
    .await?;

    notify_profile_saved(state, &profile).await;
    Ok(profile)
}

/// Re-parses resume text for an existing profile, mutating only
/// `profile_json` and (when a new blob is supplied) `resume_pdf`.
/// Unlike registration/upload, a malformed PDF rejects the request.
pub async fn update_resume(
    state: &AppState,
    email: &str,
    req: UpdateResumeRequest,
) -> Result<Profile, AppError> {
    let resume_pdf = decode_pdf_strict(req.resume_pdf.as_deref())?;
    let profile_json = parse_resume_text(state.parser.as_ref(), &req.resume_text).await?;

    let profile = state
        .profiles
        .update_resume(email, &profile_json, resume_pdf)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    notify_profile_saved(state, &profile).await;
    Ok(profile)
}

async fn ingest_profile(
    state: &AppState,
    email: &str,
    resume_text: &str,
    resume_pdf_b64: Option<&str>,
    fields: DescriptiveFields,
    omitted: OmittedFields,
) -> Result<Profile, AppError> {
    let profile_json = parse_resume_text(state.parser.as_ref(), resume_text).await?;
    let resume_pdf = decode_pdf_lenient(resume_pdf_b64);

    let profile = state
        .profiles
        .upsert(
            NewProfile {
                email: email.to_string(),
                fields,
                profile_json,
                resume_pdf,
            },
            omitted,
        )
        .await?;

    Ok(profile)
}

/// Blank text short-circuits to the literal empty-object JSON without a
/// service round-trip.
async fn parse_resume_text(
    parser: &dyn ResumeParser,
    resume_text: &str,
) -> Result<String, AppError> {
    if resume_text.trim().is_empty() {
        return Ok(EMPTY_RESUME_JSON.to_string());
    }
    Ok(parser.parse(resume_text).await?)
}

/// Registration/upload tolerance: a PDF that fails to decode is dropped and
/// the request proceeds without it.
fn decode_pdf_lenient(b64: Option<&str>) -> Option<Vec<u8>> {
    let b64 = b64?.trim();
    if b64.is_empty() {
        return None;
    }
    match BASE64.decode(b64) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Invalid base64 PDF, storing profile without it: {e}");
            None
        }
    }
}

/// Update strictness: a malformed PDF rejects the whole request.
fn decode_pdf_strict(b64: Option<&str>) -> Result<Option<Vec<u8>>, AppError> {
    let Some(b64) = b64 else {
        return Ok(None);
    };
    let b64 = b64.trim();
    if b64.is_empty() {
        return Ok(None);
    }
    BASE64
        .decode(b64)
        .map(Some)
        .map_err(|e| AppError::Validation(format!("Invalid base64 in resumePdf: {e}")))
}

/// Downstream notification is best-effort: failures are recorded and
/// swallowed, never surfaced to the caller.
async fn notify_profile_saved(state: &AppState, profile: &Profile) {
    if let Err(e) = state.notifier.profile_saved(profile).await {
        warn!(
            "downstream notification failed for profile {}: {e}",
            profile.id
        );
        counter!("downstream_notify_failures_total").increment(1);
    }
}
