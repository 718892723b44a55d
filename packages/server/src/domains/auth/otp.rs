//! OTP Challenge Manager.
//!
//! The verification provider generates, delivers and checks the passcode.
//! This side only asks it to do so and keeps an advisory record of the
//! latest challenge per phone; that record never takes part in a decision.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::common::{ApiError, PhoneNumber};
use crate::domains::auth::models::OtpChallenge;
use crate::kernel::{BaseChallengeStore, BaseTwilioService};

/// Validity window recorded for a new challenge.
pub const CHALLENGE_TTL_MINUTES: i64 = 10;

const APPROVED: &str = "approved";

/// Outcome of checking a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjudication {
    Approved,
    Denied,
}

#[derive(Clone)]
pub struct OtpChallengeManager {
    provider: Arc<dyn BaseTwilioService>,
    challenges: Arc<dyn BaseChallengeStore>,
}

impl OtpChallengeManager {
    pub fn new(
        provider: Arc<dyn BaseTwilioService>,
        challenges: Arc<dyn BaseChallengeStore>,
    ) -> Self {
        Self {
            provider,
            challenges,
        }
    }

    /// Ask the provider to deliver a code, then record the challenge.
    ///
    /// A provider failure is returned to the caller. A failure to write the
    /// local record is only logged: the code is already on its way and the
    /// record is not consulted when adjudicating.
    pub async fn issue_challenge(&self, phone: &PhoneNumber) -> Result<OtpChallenge, ApiError> {
        self.issue_challenge_at(phone, Utc::now()).await
    }

    pub async fn issue_challenge_at(
        &self,
        phone: &PhoneNumber,
        now: DateTime<Utc>,
    ) -> Result<OtpChallenge, ApiError> {
        let provider_sid = self
            .provider
            .send_otp(phone.as_str())
            .await
            .map_err(|e| {
                error!(phone = %phone.masked(), error = %e, "Failed to send OTP");
                ApiError::ProviderUnavailable(e)
            })?;

        let challenge = OtpChallenge {
            phone: phone.clone(),
            provider_sid,
            issued_at: now,
            expires_at: now + Duration::minutes(CHALLENGE_TTL_MINUTES),
            consumed_at: None,
        };

        // Last write wins: a newer challenge supersedes the previous record.
        if let Err(e) = self.challenges.upsert_challenge(&challenge).await {
            error!(phone = %phone.masked(), error = %e, "Failed to record OTP challenge");
        }

        info!(phone = %phone.masked(), "OTP sent");
        Ok(challenge)
    }

    /// Ask the provider whether `code` is the one it sent to `phone`.
    ///
    /// Only an explicit "approved" status approves. Any other status and any
    /// provider error deny; nothing is retried.
    pub async fn adjudicate(&self, phone: &PhoneNumber, code: &str) -> Adjudication {
        let outcome = match self.provider.verify_otp(phone.as_str(), code).await {
            Ok(status) if status == APPROVED => Adjudication::Approved,
            Ok(status) => {
                debug!(phone = %phone.masked(), %status, "OTP not approved");
                Adjudication::Denied
            }
            Err(e) => {
                warn!(phone = %phone.masked(), error = %e, "OTP verification failed");
                Adjudication::Denied
            }
        };

        if let Err(e) = self.challenges.mark_consumed(phone, Utc::now()).await {
            warn!(phone = %phone.masked(), error = %e, "Failed to mark OTP challenge consumed");
        }

        outcome
    }

    pub async fn latest_challenge(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>, ApiError> {
        Ok(self.challenges.find_challenge(phone).await?)
    }
}
