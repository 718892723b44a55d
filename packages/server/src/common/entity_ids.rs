//! Typed ID definitions for the persisted entities.

pub use super::id::Id;

/// Marker type for User entities (one per phone number).
pub struct User;

/// Marker type for MenuItem entities.
pub struct MenuItem;

/// Typed ID for User entities. Chef and delivery extension rows share it.
pub type UserId = Id<User>;

/// Typed ID for MenuItem entities.
pub type MenuItemId = Id<MenuItem>;
