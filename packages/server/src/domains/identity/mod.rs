//! Identity domain - users keyed by phone number and their role extensions.

pub mod edges;
pub mod models;
pub mod registry;
pub mod types;

pub use registry::IdentityRegistry;
pub use types::{Identity, IdentityView, NewIdentity, NewRoleProfile, ProfileFields, Role, RoleProfile};
