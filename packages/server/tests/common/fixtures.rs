//! Test fixtures for creating test data.

use server_core::common::PhoneNumber;
use server_core::domains::identity::{NewIdentity, NewRoleProfile, ProfileFields};
use uuid::Uuid;

/// A phone number no other test uses, so tests can share one database.
pub fn unique_phone() -> String {
    let digits: u64 = Uuid::new_v4().as_u128() as u64 % 10_000_000_000;
    format!("+1{:010}", digits)
}

pub fn new_identity(phone: &str, role: NewRoleProfile) -> NewIdentity {
    NewIdentity {
        phone: PhoneNumber::parse(phone).expect("valid test phone"),
        profile: ProfileFields {
            name: Some("Fixture User".to_string()),
            ..Default::default()
        },
        role,
    }
}

pub fn chef_identity(phone: &str, bio: &str) -> NewIdentity {
    new_identity(
        phone,
        NewRoleProfile::Chef {
            bio: bio.to_string(),
        },
    )
}
