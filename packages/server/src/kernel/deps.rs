//! Server dependencies (using traits for testability)
//!
//! `ServerDeps` is the central container handed to every action. It is built
//! once at startup from concrete collaborators, or from the in-memory doubles
//! in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::{JwtService, OtpChallengeManager};
use crate::domains::identity::IdentityRegistry;
use crate::kernel::{
    BaseChallengeStore, BaseIdentityStore, BaseImageStorage, BaseMenuItemStore,
    BaseTwilioService,
};

// =============================================================================
// TwilioService Adapter (implements BaseTwilioService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseTwilioService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseTwilioService for TwilioAdapter {
    async fn send_otp(&self, phone_number: &str) -> Result<String> {
        self.0
            .send_otp(phone_number)
            .await
            .map(|response| response.sid)
            .map_err(Into::into)
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<String> {
        self.0
            .verify_otp(phone_number, code)
            .await
            .map(|response| response.status)
            .map_err(Into::into)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    pub identities: IdentityRegistry,
    pub otp: OtpChallengeManager,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    pub menu_items: Arc<dyn BaseMenuItemStore>,
    pub image_storage: Arc<dyn BaseImageStorage>,
}

impl ServerDeps {
    /// Wire components from their collaborators.
    pub fn new(
        identity_store: Arc<dyn BaseIdentityStore>,
        challenge_store: Arc<dyn BaseChallengeStore>,
        menu_items: Arc<dyn BaseMenuItemStore>,
        twilio: Arc<dyn BaseTwilioService>,
        image_storage: Arc<dyn BaseImageStorage>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            identities: IdentityRegistry::new(identity_store),
            otp: OtpChallengeManager::new(twilio, challenge_store),
            jwt_service,
            menu_items,
            image_storage,
        }
    }
}
