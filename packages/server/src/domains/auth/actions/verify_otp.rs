//! Verify OTP action

use tracing::info;

use crate::common::{ApiError, PhoneNumber};
use crate::domains::auth::otp::Adjudication;
use crate::domains::auth::session::{issue_session, SessionGrant};
use crate::domains::auth::types::{parse_role, VerifyOtpRequest, ROLE_MISMATCH};
use crate::kernel::ServerDeps;

/// Adjudicate the code with the provider, then issue a session.
///
/// Order matters: the provider decides first, so an unknown phone and a
/// wrong code cost the same provider round trip.
pub async fn verify_otp(request: VerifyOtpRequest, deps: &ServerDeps) -> Result<SessionGrant, ApiError> {
    let role = parse_role(&request.role)?;
    let phone = PhoneNumber::parse(&request.phone)?;
    let code = request.otp.trim();
    if code.is_empty() {
        return Err(ApiError::Validation("OTP is required".to_string()));
    }

    if deps.otp.adjudicate(&phone, code).await == Adjudication::Denied {
        return Err(ApiError::Unauthenticated("Invalid or expired OTP".to_string()));
    }

    let user = deps.identities.lookup_by_phone(&phone).await?;
    if user.role != role {
        return Err(ApiError::Forbidden(ROLE_MISMATCH.to_string()));
    }

    let identity = deps.identities.hydrate(user, Some(role)).await?;
    let grant = issue_session(&deps.jwt_service, &identity)?;

    info!(user_id = %identity.user.id, %role, "OTP verified");
    Ok(grant)
}
