pub mod otp_challenge;

pub use otp_challenge::OtpChallenge;
