//! Minimal client for the Twilio Verify v2 API.
//!
//! Only the two calls the OTP flow needs are implemented: starting a
//! verification (Twilio generates and delivers the code) and checking a
//! submitted code against it.

use std::collections::HashMap;

pub mod models;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

pub use crate::models::{OTPResponse, OTPVerifyResponse};

pub const DEFAULT_BASE_URL: &str = "https://verify.twilio.com/v2";

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("request to Twilio failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Twilio returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse Twilio response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    base_url: String,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self::with_base_url(options, DEFAULT_BASE_URL)
    }

    /// Point the client at a different Verify endpoint (staging, local stub).
    pub fn with_base_url(options: TwilioOptions, base_url: impl Into<String>) -> Self {
        Self {
            options,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn verifications_url(&self) -> String {
        format!(
            "{base}/Services/{serv_id}/Verifications",
            base = self.base_url,
            serv_id = self.options.service_id
        )
    }

    fn verification_check_url(&self) -> String {
        format!(
            "{base}/Services/{serv_id}/VerificationCheck",
            base = self.base_url,
            serv_id = self.options.service_id
        )
    }

    /// Ask Twilio to text a fresh code to `recipient`.
    ///
    /// A new verification for the same recipient replaces any pending one
    /// on Twilio's side.
    pub async fn send_otp(&self, recipient: &str) -> Result<OTPResponse, TwilioError> {
        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Channel", "sms");

        let response = self
            .client
            .post(self.verifications_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await
            .map_err(TwilioError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Twilio rejected verification request");
            return Err(TwilioError::Status { status, body });
        }

        let data = response
            .json::<OTPResponse>()
            .await
            .map_err(TwilioError::Decode)?;
        debug!(sid = %data.sid, status = %data.status, "Twilio verification started");
        Ok(data)
    }

    /// Check `code` against the pending verification for `recipient`.
    ///
    /// Returns Twilio's verdict as-is; callers decide what counts as approved.
    pub async fn verify_otp(
        &self,
        recipient: &str,
        code: &str,
    ) -> Result<OTPVerifyResponse, TwilioError> {
        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Code", code);

        let response = self
            .client
            .post(self.verification_check_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await
            .map_err(TwilioError::Request)?;

        let status = response.status();
        if !status.is_success() {
            // Twilio answers 404 once a verification expired or was already approved
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Status { status, body });
        }

        response
            .json::<OTPVerifyResponse>()
            .await
            .map_err(TwilioError::Decode)
    }
}
