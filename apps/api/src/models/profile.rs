use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;

/// One profile per account email: parsed resume JSON, descriptive fields,
/// and the optional raw PDF blob.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub availability: Option<String>,
    pub profile_json: String,
    pub resume_pdf: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-supplied descriptive fields, all optional on every entry point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptiveFields {
    pub name: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub availability: Option<String>,
}
