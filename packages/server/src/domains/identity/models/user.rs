use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{PhoneNumber, UserId};
use crate::domains::identity::types::{Identity, NewIdentity, NewRoleProfile, Role, RoleProfile};
use crate::kernel::StoreError;

use super::{ChefProfile, DeliveryPartner};

/// User - one account per phone number, across all roles.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub phone: PhoneNumber,
    pub email: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries
// =============================================================================

impl User {
    pub async fn find_by_phone(phone: &PhoneNumber, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert the user row and its role extension in one transaction.
    ///
    /// The `users.phone` unique constraint is the source of truth for
    /// uniqueness; a violation comes back as `StoreError::DuplicatePhone`.
    pub async fn create(new: &NewIdentity, pool: &PgPool) -> Result<Identity, StoreError> {
        let mut tx = pool.begin().await.map_err(StoreError::from_sqlx)?;

        let user = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, name, phone, email, address, latitude, longitude, role, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, true)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(&new.profile.name)
        .bind(&new.phone)
        .bind(&new.profile.email)
        .bind(&new.profile.address)
        .bind(new.profile.latitude)
        .bind(new.profile.longitude)
        .bind(new.role.role())
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::from_sqlx)?;

        let profile = match &new.role {
            NewRoleProfile::Customer => RoleProfile::Customer,
            NewRoleProfile::Chef { bio } => RoleProfile::Chef(
                sqlx::query_as::<_, ChefProfile>(
                    "INSERT INTO chefs (id, bio, is_available) VALUES ($1, $2, true) RETURNING *",
                )
                .bind(user.id)
                .bind(bio)
                .fetch_one(&mut *tx)
                .await
                .map_err(StoreError::from_sqlx)?,
            ),
            NewRoleProfile::Delivery { vehicle_type } => RoleProfile::Delivery(
                sqlx::query_as::<_, DeliveryPartner>(
                    r#"
                    INSERT INTO delivery_partners (id, vehicle_type, is_available)
                    VALUES ($1, $2, true)
                    RETURNING *
                    "#,
                )
                .bind(user.id)
                .bind(vehicle_type)
                .fetch_one(&mut *tx)
                .await
                .map_err(StoreError::from_sqlx)?,
            ),
        };

        tx.commit().await.map_err(StoreError::from_sqlx)?;

        Ok(Identity {
            user,
            profile: Some(profile),
        })
    }

    /// Load the extension matching this user's stored role.
    pub async fn load_role_profile(&self, pool: &PgPool) -> Result<Option<RoleProfile>> {
        let profile = match self.role {
            Role::Customer => Some(RoleProfile::Customer),
            Role::Chef => ChefProfile::find_by_id(self.id, pool)
                .await?
                .map(RoleProfile::Chef),
            Role::Delivery => DeliveryPartner::find_by_id(self.id, pool)
                .await?
                .map(RoleProfile::Delivery),
        };
        Ok(profile)
    }
}
