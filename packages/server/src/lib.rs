// HomeCook - API Core
//
// Phone + OTP identity and session layer for a customer / chef / delivery
// marketplace, plus the chef menu and profile endpoints built on it.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
