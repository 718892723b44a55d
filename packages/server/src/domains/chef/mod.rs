//! Chef domain - chef registration and menu items.

pub mod actions;
pub mod edges;
pub mod models;
pub mod types;

pub use models::{MenuItem, NewMenuItem};
