//! Test doubles: in-memory stores standing in for PostgreSQL and stub
//! implementations of the external parser and notifier.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::config::{Config, OmittedFields};
use crate::models::account::Account;
use crate::models::profile::Profile;
use crate::notify::ProfileNotifier;
use crate::parser::{ParserError, ResumeParser};
use crate::state::AppState;
use crate::store::{NewProfile, ProfileStore, UserStore};

pub fn sample_profile(id: i64, email: &str) -> Profile {
    Profile {
        id,
        email: email.to_string(),
        name: None,
        year: None,
        department: None,
        institution: None,
        availability: None,
        profile_json: "{}".to_string(),
        resume_pdf: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_config(omitted_fields: OmittedFields) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        parser_url: "http://parser.invalid".to_string(),
        notify_url: "http://notify.invalid".to_string(),
        jwt_secret: "test-secret".to_string(),
        omitted_fields,
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn test_state(
    users: Arc<MemoryUserStore>,
    profiles: Arc<MemoryProfileStore>,
    parser: Arc<dyn ResumeParser>,
    notifier: Arc<dyn ProfileNotifier>,
) -> AppState {
    test_state_with_mode(users, profiles, parser, notifier, OmittedFields::Clear)
}

pub fn test_state_with_mode(
    users: Arc<MemoryUserStore>,
    profiles: Arc<MemoryProfileStore>,
    parser: Arc<dyn ResumeParser>,
    notifier: Arc<dyn ProfileNotifier>,
    omitted_fields: OmittedFields,
) -> AppState {
    AppState {
        users,
        profiles,
        parser,
        notifier,
        config: test_config(omitted_fields),
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl MemoryUserStore {
    pub async fn contains(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_if_absent(&self, email: &str, password_hash: &str) -> Result<bool> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Ok(false);
        }
        accounts.insert(
            email.to_string(),
            Account {
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(true)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(email).cloned())
    }

    async fn delete(&self, email: &str) -> Result<()> {
        self.accounts.lock().unwrap().remove(email);
        Ok(())
    }
}

#[derive(Default)]
struct MemoryProfiles {
    next_id: i64,
    by_email: HashMap<String, Profile>,
}

#[derive(Default)]
pub struct MemoryProfileStore {
    inner: Mutex<MemoryProfiles>,
    fail_next_upsert: AtomicBool,
}

impl MemoryProfileStore {
    pub fn fail_next_upsert(&self) {
        self.fail_next_upsert.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn upsert(&self, new: NewProfile, omitted: OmittedFields) -> Result<Profile> {
        if self.fail_next_upsert.swap(false, Ordering::SeqCst) {
            bail!("injected upsert failure");
        }

        let NewProfile {
            email,
            fields,
            profile_json,
            resume_pdf,
        } = new;

        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.by_email.get_mut(&email) {
            match omitted {
                OmittedFields::Clear => {
                    existing.name = fields.name;
                    existing.year = fields.year;
                    existing.department = fields.department;
                    existing.institution = fields.institution;
                    existing.availability = fields.availability;
                    existing.resume_pdf = resume_pdf;
                }
                OmittedFields::Keep => {
                    if fields.name.is_some() {
                        existing.name = fields.name;
                    }
                    if fields.year.is_some() {
                        existing.year = fields.year;
                    }
                    if fields.department.is_some() {
                        existing.department = fields.department;
                    }
                    if fields.institution.is_some() {
                        existing.institution = fields.institution;
                    }
                    if fields.availability.is_some() {
                        existing.availability = fields.availability;
                    }
                    if resume_pdf.is_some() {
                        existing.resume_pdf = resume_pdf;
                    }
                }
            }
            existing.profile_json = profile_json;
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        inner.next_id += 1;
        let row = Profile {
            id: inner.next_id,
            email: email.clone(),
            name: fields.name,
            year: fields.year,
            department: fields.department,
            institution: fields.institution,
            availability: fields.availability,
            profile_json,
            resume_pdf,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.by_email.insert(email, row.clone());
        Ok(row)
    }

    async fn update_resume(
        &self,
        email: &str,
        profile_json: &str,
        resume_pdf: Option<Vec<u8>>,
    ) -> Result<Option<Profile>> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.by_email.get_mut(email).map(|profile| {
            profile.profile_json = profile_json.to_string();
            if let Some(pdf) = resume_pdf {
                profile.resume_pdf = Some(pdf);
            }
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        Ok(self.inner.lock().unwrap().by_email.get(email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .by_email
            .values()
            .find(|p| p.id == id)
            .cloned())
    }
}

pub struct StubParser {
    reply: Option<String>,
}

impl StubParser {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ResumeParser for StubParser {
    async fn parse(&self, _resume_text: &str) -> Result<String, ParserError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ParserError::Rejected(
                "injected parser failure".to_string(),
            )),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notified: Mutex<Vec<i64>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            notified: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn notified_ids(&self) -> Vec<i64> {
        self.notified.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileNotifier for RecordingNotifier {
    async fn profile_saved(&self, profile: &Profile) -> Result<()> {
        if self.fail {
            bail!("injected notifier failure");
        }
        self.notified.lock().unwrap().push(profile.id);
        Ok(())
    }
}
