//! Identity domain types.
//!
//! Role-specific data is a tagged union (`RoleProfile`) rather than a bag of
//! optional fields: callers match on the variant to decide what to expose.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::PhoneNumber;

use super::models::{ChefProfile, DeliveryPartner, User};

/// Closed set of account roles. Assigned at registration, never changed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Customer,
    Chef,
    Delivery,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Chef => "chef",
            Role::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "chef" => Ok(Role::Chef),
            "delivery" => Ok(Role::Delivery),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Descriptive profile attributes. Not part of any invariant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Role plus the data needed to create its extension row.
#[derive(Debug, Clone)]
pub enum NewRoleProfile {
    Customer,
    Chef { bio: String },
    Delivery { vehicle_type: Option<String> },
}

impl NewRoleProfile {
    pub fn role(&self) -> Role {
        match self {
            NewRoleProfile::Customer => Role::Customer,
            NewRoleProfile::Chef { .. } => Role::Chef,
            NewRoleProfile::Delivery { .. } => Role::Delivery,
        }
    }
}

/// Everything `register` needs to create an identity.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub phone: PhoneNumber,
    pub profile: ProfileFields,
    pub role: NewRoleProfile,
}

/// Hydrated role extension.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Customer,
    Chef(ChefProfile),
    Delivery(DeliveryPartner),
}

/// A user row plus, when loaded, its role extension.
///
/// `profile` is `None` when the extension was not hydrated, e.g. because the
/// caller authenticated as a different role than the stored one.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    pub profile: Option<RoleProfile>,
}

impl Identity {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Client-facing representation, with exactly one extension key when the
    /// hydrated variant carries data.
    pub fn view(&self) -> IdentityView {
        let (chef, delivery_partner) = match &self.profile {
            Some(RoleProfile::Chef(chef)) => (Some(chef.clone()), None),
            Some(RoleProfile::Delivery(partner)) => (None, Some(partner.clone())),
            Some(RoleProfile::Customer) | None => (None, None),
        };

        IdentityView {
            user: self.user.clone(),
            chef,
            delivery_partner,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chef: Option<ChefProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_partner: Option<DeliveryPartner>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;
    use chrono::Utc;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            name: Some("Asha".to_string()),
            phone: PhoneNumber::parse("+15550001111").unwrap(),
            email: None,
            address: None,
            latitude: None,
            longitude: None,
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("chef".parse::<Role>(), Ok(Role::Chef));
        assert_eq!("delivery".parse::<Role>(), Ok(Role::Delivery));
        assert!("admin".parse::<Role>().is_err());
        assert!("Chef".parse::<Role>().is_err());
    }

    #[test]
    fn test_view_includes_chef_extension() {
        let u = user(Role::Chef);
        let identity = Identity {
            profile: Some(RoleProfile::Chef(ChefProfile {
                id: u.id,
                bio: "Home-style thali".to_string(),
                is_available: true,
            })),
            user: u,
        };

        let json = serde_json::to_value(identity.view()).unwrap();
        assert_eq!(json["role"], "chef");
        assert_eq!(json["chef"]["bio"], "Home-style thali");
        assert_eq!(json["chef"]["isAvailable"], true);
        assert!(json.get("deliveryPartner").is_none());
    }

    #[test]
    fn test_view_without_hydration_has_no_extension() {
        let identity = Identity {
            user: user(Role::Chef),
            profile: None,
        };

        let json = serde_json::to_value(identity.view()).unwrap();
        assert!(json.get("chef").is_none());
        assert_eq!(json["phone"], "+15550001111");
        assert_eq!(json["isActive"], true);
    }
}
