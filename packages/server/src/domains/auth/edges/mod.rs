//! HTTP edges for the auth domain (`/auth/*`).

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;

use crate::common::{ApiError, Reply};
use crate::domains::auth::actions;
use crate::domains::auth::session::SessionGrant;
use crate::domains::auth::types::{
    OtpIssued, RequestOtpRequest, SignupRequest, SignupResult, VerifyOtpRequest,
};
use crate::server::app::AxumAppState;

/// `POST /auth/signup`
pub async fn signup(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Reply<SignupResult>, ApiError> {
    let Json(request) = payload?;
    let result = actions::signup(request, &state.deps).await?;

    Ok(Reply::created(
        "User registered successfully. Please verify your phone number.",
        result,
    ))
}

/// `POST /auth/request-otp`
pub async fn request_otp(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<RequestOtpRequest>, JsonRejection>,
) -> Result<Reply<OtpIssued>, ApiError> {
    let Json(request) = payload?;
    let issued = actions::request_otp(request, &state.deps).await?;

    Ok(Reply::ok("OTP sent successfully", issued))
}

/// `POST /auth/verify-otp`
pub async fn verify_otp(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Reply<SessionGrant>, ApiError> {
    let Json(request) = payload?;
    let grant = actions::verify_otp(request, &state.deps).await?;

    Ok(Reply::ok("OTP verified successfully", grant))
}
