//! Customer signup action

use tracing::info;

use crate::common::{ApiError, PhoneNumber};
use crate::domains::auth::types::{SignupRequest, SignupResult};
use crate::domains::identity::types::{NewIdentity, NewRoleProfile};
use crate::kernel::ServerDeps;

/// Register a customer and send the first OTP.
///
/// The identity is persisted before the OTP is requested. If the provider
/// then fails the error is returned, the identity stays, and the client is
/// expected to call `request-otp` later.
pub async fn signup(request: SignupRequest, deps: &ServerDeps) -> Result<SignupResult, ApiError> {
    let phone = PhoneNumber::parse(&request.phone)?;

    let identity = deps
        .identities
        .register(NewIdentity {
            phone: phone.clone(),
            profile: request.profile,
            role: NewRoleProfile::Customer,
        })
        .await?;

    deps.otp.issue_challenge(&phone).await?;

    info!(user_id = %identity.user.id, "Customer signed up");
    Ok(SignupResult {
        user_id: identity.user.id,
        phone,
    })
}
