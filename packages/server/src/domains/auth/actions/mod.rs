//! Auth domain actions - business logic functions
//!
//! Actions are plain async functions over `ServerDeps`, called from the HTTP
//! edges. They validate input, drive the registry and OTP manager, and return
//! typed results or `ApiError`.

mod request_otp;
mod signup;
mod verify_otp;

pub use request_otp::request_otp;
pub use signup::signup;
pub use verify_otp::verify_otp;
