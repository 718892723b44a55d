use serde::Deserialize;

/// Response to `POST /Services/{sid}/Verifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct OTPResponse {
    pub sid: String,
    pub to: String,
    pub channel: String,
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

/// Response to `POST /Services/{sid}/VerificationCheck`.
#[derive(Debug, Clone, Deserialize)]
pub struct OTPVerifyResponse {
    #[serde(default)]
    pub sid: Option<String>,
    pub to: String,
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

impl OTPVerifyResponse {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}
