// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod phone;
pub mod response;

pub use entity_ids::*;
pub use errors::ApiError;
pub use id::Id;
pub use phone::{PhoneError, PhoneNumber};
pub use response::{ApiResponse, Reply};
