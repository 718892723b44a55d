// Business domains
pub mod auth;
pub mod chef;
pub mod identity;
