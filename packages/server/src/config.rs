use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::domains::auth::jwt::DEFAULT_SESSION_TTL_HOURS;

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_TTL_HOURS: i64 = 365 * 24;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_verify_service_sid: String,
    /// Override for the Twilio Verify endpoint (staging, local stubs)
    pub twilio_base_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Session lifetime; role claims are trusted for this long
    pub session_ttl_hours: i64,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| var(key).with_context(|| format!("{} must be set", key));

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let session_ttl_hours: i64 = match var("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .context("SESSION_TTL_HOURS must be a whole number of hours")?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            bail!(
                "SESSION_TTL_HOURS must be between 1 and {}",
                MAX_SESSION_TTL_HOURS
            );
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port,
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            twilio_verify_service_sid: required("TWILIO_VERIFY_SERVICE_SID")?,
            twilio_base_url: var("TWILIO_BASE_URL").filter(|url| !url.is_empty()),
            jwt_secret,
            jwt_issuer: var("JWT_ISSUER").unwrap_or_else(|| "homecook".to_string()),
            session_ttl_hours,
            upload_dir: var("UPLOAD_DIR")
                .unwrap_or_else(|| "./uploads".to_string())
                .into(),
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
