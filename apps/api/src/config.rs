use anyhow::{bail, Context, Result};

/// Controls what an upload does with descriptive fields the caller omitted:
/// `Clear` overwrites them (and the PDF) with whatever was supplied, including
/// nothing; `Keep` preserves the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmittedFields {
    Clear,
    Keep,
}

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub parser_url: String,
    pub notify_url: String,
    pub jwt_secret: String,
    pub omitted_fields: OmittedFields,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            parser_url: require_env("PARSER_URL")?,
            notify_url: require_env("NOTIFY_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            omitted_fields: parse_omitted_fields(
                &std::env::var("UPLOAD_OMITTED_FIELDS").unwrap_or_else(|_| "clear".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_omitted_fields(value: &str) -> Result<OmittedFields> {
    match value {
        "clear" => Ok(OmittedFields::Clear),
        "keep" => Ok(OmittedFields::Keep),
        other => bail!("UPLOAD_OMITTED_FIELDS must be 'clear' or 'keep', got '{other}'"),
    }
}
