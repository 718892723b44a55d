//! Auth domain - phone + OTP login and session issuance
//!
//! Responsibilities:
//! - OTP challenges delegated to the verification provider (Twilio Verify)
//! - Session tokens (JWT) minted after a successful adjudication
//! - HTTP edges for signup, request-otp and verify-otp

pub mod actions;
pub mod edges;
pub mod jwt;
pub mod models;
pub mod otp;
pub mod session;
pub mod types;

pub use jwt::{Claims, JwtService, SigningError};
pub use otp::{Adjudication, OtpChallengeManager};
pub use session::{issue_session, SessionGrant};
