use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::common::{ApiError, UserId};
use crate::domains::auth::JwtService;
use crate::domains::identity::types::Role;

/// Authenticated caller, taken from a verified session token.
///
/// The role is trusted as signed; it is not re-read from the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
    pub phone: String,
}

/// Stage 1: verify the bearer token.
///
/// Missing header, wrong scheme, bad signature and expiry all produce the
/// same `Unauthenticated` error.
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(ApiError::invalid_token)?;

    let claims = jwt_service.verify_token(token).map_err(|e| {
        debug!(error = %e, "Rejected session token");
        ApiError::invalid_token()
    })?;

    Ok(AuthUser {
        user_id: claims.user_id,
        role: claims.role,
        phone: claims.phone,
    })
}

/// Token from an `Authorization` value; the scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Stage 2: the claimed role must be one of `allowed`.
pub fn authorize(user: &AuthUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        debug!(user_id = %user.user_id, role = %user.role, "Role not allowed for route");
        Err(ApiError::Forbidden("Unauthorized access".to_string()))
    }
}

/// Require a valid token; adds `AuthUser` to request extensions.
pub async fn require_auth(
    jwt_service: Arc<JwtService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(request.headers(), &jwt_service)?;
    debug!(user_id = %user.user_id, role = %user.role, "Authenticated user");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Require an authenticated caller holding one of `allowed`.
///
/// Must run after `require_auth`.
pub async fn require_roles(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(ApiError::invalid_token)?;
    authorize(user, allowed)?;

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(ApiError::invalid_token)
    }
}
