//! Re-issue an OTP for an existing identity

use tracing::info;

use crate::common::{ApiError, PhoneNumber};
use crate::domains::auth::types::{parse_role, OtpIssued, RequestOtpRequest, ROLE_MISMATCH};
use crate::kernel::ServerDeps;

/// Send a fresh code to a registered phone, provided the caller asked for
/// the role the identity actually holds.
pub async fn request_otp(request: RequestOtpRequest, deps: &ServerDeps) -> Result<OtpIssued, ApiError> {
    let role = parse_role(&request.role)?;
    let phone = PhoneNumber::parse(&request.phone)?;

    let user = deps.identities.lookup_by_phone(&phone).await?;
    if user.role != role {
        info!(user_id = %user.id, requested = %role, actual = %user.role, "OTP requested for wrong role");
        return Err(ApiError::Forbidden(ROLE_MISMATCH.to_string()));
    }

    deps.otp.issue_challenge(&phone).await?;

    Ok(OtpIssued { phone, role })
}
