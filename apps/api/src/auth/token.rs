use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Tokens are valid for 24 hours from issuance.
const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues an HS256 bearer token for the given account email.
pub fn issue(secret: &str, email: &str) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: email.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("failed to sign token")
}

/// Verifies a bearer token and returns the subject email.
pub fn verify(secret: &str, token: &str) -> Result<String> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("token verification failed")?;
    Ok(data.claims.sub)
}
