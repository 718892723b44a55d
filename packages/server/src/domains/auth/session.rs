//! Session issuance - turns a verified identity into a bearer token.

use serde::Serialize;
use tracing::info;

use crate::domains::auth::jwt::{JwtService, SigningError};
use crate::domains::identity::types::{Identity, IdentityView};

/// Signed token plus the redacted identity returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGrant {
    pub token: String,
    pub user: IdentityView,
}

/// Sign `{id, role, phone, iat, exp}` for `identity`.
///
/// No server-side record is kept; the token is valid until `exp`.
pub fn issue_session(jwt: &JwtService, identity: &Identity) -> Result<SessionGrant, SigningError> {
    let user = &identity.user;
    let token = jwt.create_token(user.id, user.role, user.phone.as_str())?;

    info!(user_id = %user.id, role = %user.role, "Session issued");

    Ok(SessionGrant {
        token,
        user: identity.view(),
    })
}
