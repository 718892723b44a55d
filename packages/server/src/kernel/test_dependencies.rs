// Test doubles - in-memory implementations of the kernel traits
//
// Injected in place of Postgres, Twilio and image storage so components and
// the full router can be exercised without external services.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{
    BaseChallengeStore, BaseIdentityStore, BaseImageStorage, BaseMenuItemStore,
    BaseTwilioService, StoreError,
};
use crate::common::{MenuItemId, PhoneNumber, UserId};
use crate::domains::auth::models::OtpChallenge;
use crate::domains::chef::models::{MenuItem, NewMenuItem};
use crate::domains::identity::models::{ChefProfile, DeliveryPartner, User};
use crate::domains::identity::types::{Identity, NewIdentity, NewRoleProfile, Role, RoleProfile};

// =============================================================================
// In-memory store (identities, challenges, menu items)
// =============================================================================

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    chefs: HashMap<UserId, ChefProfile>,
    delivery_partners: HashMap<UserId, DeliveryPartner>,
    challenges: HashMap<PhoneNumber, OtpChallenge>,
    menu_items: Vec<MenuItem>,
}

/// Single mutex over every table, so each write is atomic the way a
/// database transaction would be.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    hide_phones: AtomicBool,
    fail_extension_insert: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_user_by_phone` miss, as if a concurrent writer committed
    /// between the registry's lookup and its insert.
    pub fn hide_phone_from_lookups(&self, hide: bool) {
        self.hide_phones.store(hide, Ordering::SeqCst);
    }

    /// Make the next chef/delivery extension insert fail.
    pub fn fail_extension_insert(&self, fail: bool) {
        self.fail_extension_insert.store(fail, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn chef_count(&self) -> usize {
        self.tables.lock().unwrap().chefs.len()
    }

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.tables.lock().unwrap().menu_items.clone()
    }
}

#[async_trait]
impl BaseIdentityStore for InMemoryStore {
    async fn create_identity(&self, new: &NewIdentity) -> Result<Identity, StoreError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.users.values().any(|u| u.phone == new.phone) {
            return Err(StoreError::DuplicatePhone);
        }

        let user = User {
            id: UserId::new(),
            name: new.profile.name.clone(),
            phone: new.phone.clone(),
            email: new.profile.email.clone(),
            address: new.profile.address.clone(),
            latitude: new.profile.latitude,
            longitude: new.profile.longitude,
            role: new.role.role(),
            is_active: true,
            created_at: Utc::now(),
        };

        let needs_extension = !matches!(new.role, NewRoleProfile::Customer);
        if needs_extension && self.fail_extension_insert.swap(false, Ordering::SeqCst) {
            // Nothing has been written yet, so the failure leaves no trace.
            return Err(StoreError::Other(anyhow!("extension insert failed")));
        }

        let profile = match &new.role {
            NewRoleProfile::Customer => RoleProfile::Customer,
            NewRoleProfile::Chef { bio } => {
                let chef = ChefProfile {
                    id: user.id,
                    bio: bio.clone(),
                    is_available: true,
                };
                tables.chefs.insert(user.id, chef.clone());
                RoleProfile::Chef(chef)
            }
            NewRoleProfile::Delivery { vehicle_type } => {
                let partner = DeliveryPartner {
                    id: user.id,
                    vehicle_type: vehicle_type.clone(),
                    is_available: true,
                };
                tables.delivery_partners.insert(user.id, partner.clone());
                RoleProfile::Delivery(partner)
            }
        };
        tables.users.insert(user.id, user.clone());

        Ok(Identity {
            user,
            profile: Some(profile),
        })
    }

    async fn find_user_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>> {
        if self.hide_phones.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().find(|u| &u.phone == phone).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }

    async fn load_role_profile(&self, user: &User) -> Result<Option<RoleProfile>> {
        let tables = self.tables.lock().unwrap();
        Ok(match user.role {
            Role::Customer => Some(RoleProfile::Customer),
            Role::Chef => tables.chefs.get(&user.id).cloned().map(RoleProfile::Chef),
            Role::Delivery => tables
                .delivery_partners
                .get(&user.id)
                .cloned()
                .map(RoleProfile::Delivery),
        })
    }
}

#[async_trait]
impl BaseChallengeStore for InMemoryStore {
    async fn upsert_challenge(&self, challenge: &OtpChallenge) -> Result<()> {
        self.tables
            .lock()
            .unwrap()
            .challenges
            .insert(challenge.phone.clone(), challenge.clone());
        Ok(())
    }

    async fn find_challenge(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>> {
        Ok(self.tables.lock().unwrap().challenges.get(phone).cloned())
    }

    async fn mark_consumed(&self, phone: &PhoneNumber, at: DateTime<Utc>) -> Result<()> {
        if let Some(challenge) = self.tables.lock().unwrap().challenges.get_mut(phone) {
            challenge.consumed_at.get_or_insert(at);
        }
        Ok(())
    }
}

#[async_trait]
impl BaseMenuItemStore for InMemoryStore {
    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<MenuItem> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.chefs.contains_key(&item.chef_id) {
            return Err(anyhow!("menu_items_chef_id_fkey violated"));
        }

        let created = MenuItem {
            id: MenuItemId::new(),
            chef_id: item.chef_id,
            item_name: item.item_name.clone(),
            description: item.description.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            created_at: Utc::now(),
        };
        tables.menu_items.push(created.clone());
        Ok(created)
    }
}

// =============================================================================
// Mock Twilio
// =============================================================================

/// Stands in for the verification provider.
///
/// A code registered with `with_code` is "approved" for its phone; anything
/// else comes back "pending", which is what Twilio answers for a wrong code.
#[derive(Default)]
pub struct MockTwilio {
    codes: Mutex<HashMap<String, String>>,
    sent: Mutex<Vec<String>>,
    verify_calls: Mutex<Vec<(String, String)>>,
    counter: AtomicUsize,
    fail_send: bool,
    fail_verify: bool,
}

impl MockTwilio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(self, phone: &str, code: &str) -> Self {
        self.set_code(phone, code);
        self
    }

    /// Register the code the provider will approve for `phone`.
    pub fn set_code(&self, phone: &str, code: &str) {
        self.codes
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn failing_verify(mut self) -> Self {
        self.fail_verify = true;
        self
    }

    /// Phones a code was sent to, in order.
    pub fn sent_to(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> Vec<(String, String)> {
        self.verify_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseTwilioService for MockTwilio {
    async fn send_otp(&self, phone_number: &str) -> Result<String> {
        if self.fail_send {
            return Err(anyhow!("Twilio returned 503 Service Unavailable"));
        }
        self.sent.lock().unwrap().push(phone_number.to_string());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("VE_mock_{}", n))
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<String> {
        self.verify_calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), code.to_string()));
        if self.fail_verify {
            return Err(anyhow!("Twilio returned 404 Not Found"));
        }

        let approved = self
            .codes
            .lock()
            .unwrap()
            .get(phone_number)
            .is_some_and(|expected| expected == code);
        Ok(if approved { "approved" } else { "pending" }.to_string())
    }
}

// =============================================================================
// Mock image storage
// =============================================================================

#[derive(Default)]
pub struct MockImageStorage {
    stored: Mutex<Vec<(String, String, usize)>>,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// (key, content type, size) of every stored image.
    pub fn stored(&self) -> Vec<(String, String, usize)> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseImageStorage for MockImageStorage {
    async fn put_image(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        self.stored
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), bytes.len()));
        Ok(format!("https://images.test/{}", key))
    }

    async fn delete_image(&self, key: &str) -> Result<()> {
        self.stored.lock().unwrap().retain(|(stored, _, _)| stored != key);
        Ok(())
    }
}
