//! Identity Registry - owns users and their role extensions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::common::{ApiError, PhoneNumber, UserId};
use crate::domains::identity::models::User;
use crate::domains::identity::types::{Identity, NewIdentity, Role};
use crate::kernel::{BaseIdentityStore, StoreError};

const DUPLICATE_PHONE: &str = "A user with this phone number already exists";

#[derive(Clone)]
pub struct IdentityRegistry {
    store: Arc<dyn BaseIdentityStore>,
}

impl IdentityRegistry {
    pub fn new(store: Arc<dyn BaseIdentityStore>) -> Self {
        Self { store }
    }

    /// Create a new identity (and its extension, for chef/delivery).
    ///
    /// The lookup is only a fast path: two concurrent requests can both pass
    /// it, and the store's uniqueness constraint decides. Both paths yield
    /// the same `Conflict`.
    pub async fn register(&self, new: NewIdentity) -> Result<Identity, ApiError> {
        if self.store.find_user_by_phone(&new.phone).await?.is_some() {
            info!(phone = %new.phone.masked(), "Registration rejected: phone already registered");
            return Err(ApiError::Conflict(DUPLICATE_PHONE.to_string()));
        }

        match self.store.create_identity(&new).await {
            Ok(identity) => {
                info!(
                    user_id = %identity.user.id,
                    role = %identity.role(),
                    phone = %new.phone.masked(),
                    "Identity registered"
                );
                Ok(identity)
            }
            Err(StoreError::DuplicatePhone) => {
                warn!(phone = %new.phone.masked(), "Concurrent registration lost the uniqueness race");
                Err(ApiError::Conflict(DUPLICATE_PHONE.to_string()))
            }
            Err(StoreError::Other(e)) => Err(ApiError::Internal(e)),
        }
    }

    pub async fn lookup_by_phone(&self, phone: &PhoneNumber) -> Result<User, ApiError> {
        self.store
            .find_user_by_phone(phone)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Load a user by id, hydrating the role extension only when
    /// `claimed_role` matches the stored role.
    pub async fn lookup_by_id(
        &self,
        id: UserId,
        claimed_role: Option<Role>,
    ) -> Result<Identity, ApiError> {
        let user = self
            .store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        self.hydrate(user, claimed_role).await
    }

    /// Attach the role extension to an already loaded user.
    pub async fn hydrate(&self, user: User, claimed_role: Option<Role>) -> Result<Identity, ApiError> {
        let profile = match claimed_role {
            Some(role) if role == user.role => self.store.load_role_profile(&user).await?,
            _ => None,
        };

        Ok(Identity { user, profile })
    }
}
