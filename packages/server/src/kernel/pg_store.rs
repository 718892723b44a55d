//! Postgres-backed implementation of the storage traits.
//!
//! SQL lives on the models; this type only routes trait calls to them.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{PhoneNumber, UserId};
use crate::domains::auth::models::OtpChallenge;
use crate::domains::chef::models::{MenuItem, NewMenuItem};
use crate::domains::identity::models::User;
use crate::domains::identity::types::{Identity, NewIdentity, RoleProfile};
use crate::kernel::{BaseChallengeStore, BaseIdentityStore, BaseMenuItemStore, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseIdentityStore for PgStore {
    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, StoreError> {
        User::create(identity, &self.pool).await
    }

    async fn find_user_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>> {
        User::find_by_phone(phone, &self.pool).await
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn load_role_profile(&self, user: &User) -> Result<Option<RoleProfile>> {
        user.load_role_profile(&self.pool).await
    }
}

#[async_trait]
impl BaseChallengeStore for PgStore {
    async fn upsert_challenge(&self, challenge: &OtpChallenge) -> Result<()> {
        challenge.upsert(&self.pool).await
    }

    async fn find_challenge(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>> {
        OtpChallenge::find_by_phone(phone, &self.pool).await
    }

    async fn mark_consumed(&self, phone: &PhoneNumber, at: DateTime<Utc>) -> Result<()> {
        OtpChallenge::mark_consumed(phone, at, &self.pool).await
    }
}

#[async_trait]
impl BaseMenuItemStore for PgStore {
    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<MenuItem> {
        MenuItem::create(item, &self.pool).await
    }
}
