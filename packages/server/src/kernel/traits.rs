// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Components (IdentityRegistry, OtpChallengeManager, ...) are constructed with
// trait objects so tests can swap Postgres/Twilio for in-memory doubles.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::common::{PhoneNumber, UserId};
use crate::domains::auth::models::OtpChallenge;
use crate::domains::chef::models::{MenuItem, NewMenuItem};
use crate::domains::identity::models::User;
use crate::domains::identity::types::{Identity, NewIdentity, RoleProfile};

// =============================================================================
// Storage errors
// =============================================================================

/// Unique constraint on `users.phone`.
pub const USERS_PHONE_KEY: &str = "users_phone_key";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The phone uniqueness constraint rejected the write.
    #[error("phone number already registered")]
    DuplicatePhone,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Translate a sqlx error. Only a violation of `users_phone_key` is a
    /// duplicate phone; other unique constraints stay `Other`.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() && db.constraint() == Some(USERS_PHONE_KEY) {
                return StoreError::DuplicatePhone;
            }
        }
        StoreError::Other(e.into())
    }
}

// =============================================================================
// Identity Store Trait (users + role extensions)
// =============================================================================

#[async_trait]
pub trait BaseIdentityStore: Send + Sync {
    /// Create the user and its role extension as one atomic unit.
    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, StoreError>;

    async fn find_user_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Load the extension for the user's stored role (`Customer` has none).
    async fn load_role_profile(&self, user: &User) -> Result<Option<RoleProfile>>;
}

// =============================================================================
// OTP Challenge Store Trait (advisory bookkeeping)
// =============================================================================

#[async_trait]
pub trait BaseChallengeStore: Send + Sync {
    /// Insert or overwrite the single challenge record for a phone.
    async fn upsert_challenge(&self, challenge: &OtpChallenge) -> Result<()>;

    async fn find_challenge(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>>;

    async fn mark_consumed(&self, phone: &PhoneNumber, at: DateTime<Utc>) -> Result<()>;
}

// =============================================================================
// Menu Item Store Trait
// =============================================================================

#[async_trait]
pub trait BaseMenuItemStore: Send + Sync {
    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<MenuItem>;
}

// =============================================================================
// Twilio Service Trait (Infrastructure - SMS/OTP)
// =============================================================================

#[async_trait]
pub trait BaseTwilioService: Send + Sync {
    /// Ask the provider to deliver a code; returns the provider's verification id.
    async fn send_otp(&self, phone_number: &str) -> Result<String>;

    /// Ask the provider to check a code; returns its status (e.g. "approved").
    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<String>;
}

// =============================================================================
// Image Storage Trait (Infrastructure - object storage)
// =============================================================================

#[async_trait]
pub trait BaseImageStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put_image(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String>;

    /// Remove a stored image. Missing keys are not an error.
    async fn delete_image(&self, key: &str) -> Result<()>;
}
