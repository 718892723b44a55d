pub mod chef;
pub mod delivery_partner;
pub mod user;

pub use chef::ChefProfile;
pub use delivery_partner::DeliveryPartner;
pub use user::User;
