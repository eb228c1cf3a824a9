use anyhow::Result;
use async_trait::async_trait;

use crate::config::OmittedFields;
use crate::models::account::Account;
use crate::models::profile::{DescriptiveFields, Profile};

pub mod postgres;

/// A fully-specified profile write for `ProfileStore::upsert`.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub email: String,
    pub fields: DescriptiveFields,
    pub profile_json: String,
    pub resume_pdf: Option<Vec<u8>>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Atomic conditional insert: returns `false` without touching anything
    /// when an account with this email already exists. This is the
    /// authoritative duplicate guard for registration.
    async fn create_if_absent(&self, email: &str, password_hash: &str) -> Result<bool>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn delete(&self, email: &str) -> Result<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create-or-overwrite keyed on email. With `OmittedFields::Keep`, absent
    /// optional values coalesce with the stored row instead of clearing it.
    async fn upsert(&self, profile: NewProfile, omitted: OmittedFields) -> Result<Profile>;

    /// Mutates only `profile_json` and, when a new blob is supplied,
    /// `resume_pdf`. Descriptive fields are never touched. Returns `None`
    /// when no profile exists for the email.
    async fn update_resume(
        &self,
        email: &str,
        profile_json: &str,
        resume_pdf: Option<Vec<u8>>,
    ) -> Result<Option<Profile>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>>;
}
