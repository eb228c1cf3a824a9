#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Account record keyed by email. Created at registration and never mutated;
/// only the compensating delete after a failed registration removes one.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
