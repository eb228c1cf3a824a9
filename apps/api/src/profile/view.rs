//! Response shaping: pure projections from the stored profile row.
//!
//! Every endpoint except `GET /api/profile` returns `ProfileView`, which
//! never carries the parsed resume JSON. The owner's endpoint returns
//! `OwnProfileView` with the surrogate id and the raw JSON included.

use serde::Serialize;

use crate::models::profile::Profile;

/// Derived relative download URL, present only when a PDF blob is stored.
fn resume_pdf_url(profile: &Profile) -> Option<String> {
    profile
        .resume_pdf
        .as_ref()
        .map(|_| format!("/api/resume/download/{}", profile.id))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub email: String,
    pub name: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_pdf_url: Option<String>,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            name: profile.name.clone(),
            year: profile.year.clone(),
            department: profile.department.clone(),
            institution: profile.institution.clone(),
            availability: profile.availability.clone(),
            resume_pdf_url: resume_pdf_url(profile),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfileView {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub availability: Option<String>,
    pub profile_json: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_pdf_url: Option<String>,
}

impl From<&Profile> for OwnProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
            year: profile.year.clone(),
            department: profile.department.clone(),
            institution: profile.institution.clone(),
            availability: profile.availability.clone(),
            profile_json: profile.profile_json.clone(),
            resume_pdf_url: resume_pdf_url(profile),
        }
    }
}
