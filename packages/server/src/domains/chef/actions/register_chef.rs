use tracing::info;

use crate::common::{ApiError, PhoneNumber};
use crate::domains::chef::types::{ChefRegisterRequest, MAX_BIO_CHARS};
use crate::domains::identity::types::{Identity, NewIdentity, NewRoleProfile};
use crate::kernel::ServerDeps;

/// Register a chef (user + chef row, atomically) and send the first OTP.
pub async fn register_chef(
    request: ChefRegisterRequest,
    deps: &ServerDeps,
) -> Result<Identity, ApiError> {
    let phone = PhoneNumber::parse(&request.phone)?;
    let bio = request.bio.unwrap_or_default();
    if bio.chars().count() > MAX_BIO_CHARS {
        return Err(ApiError::Validation(format!(
            "Bio must be at most {} characters",
            MAX_BIO_CHARS
        )));
    }

    let identity = deps
        .identities
        .register(NewIdentity {
            phone: phone.clone(),
            profile: request.profile,
            role: NewRoleProfile::Chef { bio },
        })
        .await?;

    deps.otp.issue_challenge(&phone).await?;

    info!(user_id = %identity.user.id, "Chef registered");
    Ok(identity)
}
