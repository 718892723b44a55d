use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::common::UserId;
use crate::domains::identity::types::Role;

/// Default session lifetime (7 days). Role claims are trusted for this long
/// without re-reading the registry, so it doubles as the staleness window.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 7 * 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (user_id as string)
    pub user_id: UserId, // User UUID
    pub role: Role,      // Role the session was granted for
    pub phone: String,   // Canonical phone number
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: String,     // JWT ID (unique token identifier)
}

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("session signing key is not configured")]
    MissingKey,

    #[error(transparent)]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    has_key: bool,
    issuer: String,
    ttl: Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer (7 day sessions)
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            has_key: !secret.is_empty(),
            issuer,
            ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn create_token(
        &self,
        user_id: UserId,
        role: Role,
        phone: &str,
    ) -> Result<String, SigningError> {
        self.create_token_at(user_id, role, phone, Utc::now())
    }

    /// Create a token as if issued at `now`.
    pub fn create_token_at(
        &self,
        user_id: UserId,
        role: Role,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<String, SigningError> {
        if !self.has_key {
            return Err(SigningError::MissingKey);
        }

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            role,
            phone: phone.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verify signature and issuer, then reject tokens with `exp <= now`.
    ///
    /// Expiry is checked here rather than by `jsonwebtoken` so the boundary
    /// is exact (no leeway) and the clock can be supplied.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;
        if claims.exp <= now.timestamp() {
            bail!("token expired");
        }
        Ok(claims)
    }
}
