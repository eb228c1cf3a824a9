use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::OmittedFields;
use crate::models::account::Account;
use crate::models::profile::Profile;
use crate::store::{NewProfile, ProfileStore, UserStore};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_if_absent(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO accounts (email, password_hash) VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, email: &str) -> Result<()> {
        sqlx::query("DELETE FROM accounts WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const UPSERT_CLEAR: &str = r#"
INSERT INTO profiles
    (email, name, year, department, institution, availability, profile_json, resume_pdf)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
ON CONFLICT (email) DO UPDATE SET
    name = EXCLUDED.name,
    year = EXCLUDED.year,
    department = EXCLUDED.department,
    institution = EXCLUDED.institution,
    availability = EXCLUDED.availability,
    profile_json = EXCLUDED.profile_json,
    resume_pdf = EXCLUDED.resume_pdf,
    updated_at = NOW()
RETURNING *
"#;

const UPSERT_KEEP: &str = r#"
INSERT INTO profiles
    (email, name, year, department, institution, availability, profile_json, resume_pdf)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
ON CONFLICT (email) DO UPDATE SET
    name = COALESCE(EXCLUDED.name, profiles.name),
    year = COALESCE(EXCLUDED.year, profiles.year),
    department = COALESCE(EXCLUDED.department, profiles.department),
    institution = COALESCE(EXCLUDED.institution, profiles.institution),
    availability = COALESCE(EXCLUDED.availability, profiles.availability),
    profile_json = EXCLUDED.profile_json,
    resume_pdf = COALESCE(EXCLUDED.resume_pdf, profiles.resume_pdf),
    updated_at = NOW()
RETURNING *
"#;

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(&self, profile: NewProfile, omitted: OmittedFields) -> Result<Profile> {
        let query = match omitted {
            OmittedFields::Clear => UPSERT_CLEAR,
            OmittedFields::Keep => UPSERT_KEEP,
        };
        Ok(sqlx::query_as::<_, Profile>(query)
            .bind(&profile.email)
            .bind(&profile.fields.name)
            .bind(&profile.fields.year)
            .bind(&profile.fields.department)
            .bind(&profile.fields.institution)
            .bind(&profile.fields.availability)
            .bind(&profile.profile_json)
            .bind(&profile.resume_pdf)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_resume(
        &self,
        email: &str,
        profile_json: &str,
        resume_pdf: Option<Vec<u8>>,
    ) -> Result<Option<Profile>> {
        Ok(sqlx::query_as::<_, Profile>(
            "UPDATE profiles
             SET profile_json = $2,
                 resume_pdf = COALESCE($3, resume_pdf),
                 updated_at = NOW()
             WHERE email = $1
             RETURNING *",
        )
        .bind(email)
        .bind(profile_json)
        .bind(&resume_pdf)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        Ok(
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
        Ok(
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
