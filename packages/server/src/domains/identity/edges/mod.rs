use axum::extract::Extension;
use serde::Serialize;

use crate::common::{ApiError, Reply};
use crate::domains::identity::types::IdentityView;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: IdentityView,
}

/// `GET /user/profile` - the caller's own identity.
///
/// The extension is included only for the role the token was issued for.
pub async fn get_profile(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
) -> Result<Reply<ProfileData>, ApiError> {
    let identity = state
        .deps
        .identities
        .lookup_by_id(auth.user_id, Some(auth.role))
        .await?;

    Ok(Reply::ok(
        "Profile fetched successfully",
        ProfileData {
            user: identity.view(),
        },
    ))
}
