//! Auth domain request/response types.

use serde::{Deserialize, Serialize};

use crate::common::{ApiError, PhoneNumber, UserId};
use crate::domains::identity::types::{ProfileFields, Role};

/// `POST /auth/signup` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub phone: String,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// `POST /auth/request-otp` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestOtpRequest {
    pub phone: String,
    pub role: String,
}

/// `POST /auth/verify-otp` body.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResult {
    pub user_id: UserId,
    pub phone: PhoneNumber,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpIssued {
    pub phone: PhoneNumber,
    pub role: Role,
}

/// Returned when the requested role differs from the stored one.
pub const ROLE_MISMATCH: &str = "Invalid role for this user";

/// Parse a role from a request body.
pub fn parse_role(raw: &str) -> Result<Role, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid role specified".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_flattens_profile() {
        let body: SignupRequest = serde_json::from_str(
            r#"{"phone":"+15550001111","name":"Asha","address":"12 Lake Rd","latitude":12.9}"#,
        )
        .unwrap();

        assert_eq!(body.phone, "+15550001111");
        assert_eq!(body.profile.name.as_deref(), Some("Asha"));
        assert_eq!(body.profile.latitude, Some(12.9));
        assert!(body.profile.email.is_none());
    }

    #[test]
    fn test_parse_role_rejects_unknown() {
        assert_eq!(parse_role("customer").unwrap(), Role::Customer);
        let err = parse_role("admin").unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Invalid role specified"));
    }
}
