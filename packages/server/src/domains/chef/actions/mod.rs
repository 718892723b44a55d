//! Chef domain actions

mod create_menu_item;
mod register_chef;

pub use create_menu_item::create_menu_item;
pub use register_chef::register_chef;
