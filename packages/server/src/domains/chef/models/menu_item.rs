use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{MenuItemId, UserId};

/// MenuItem - a dish offered by a chef.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub chef_id: UserId,
    pub item_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a menu item.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub chef_id: UserId,
    pub item_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: String,
}

impl MenuItem {
    pub async fn create(item: &NewMenuItem, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO menu_items (id, chef_id, item_name, description, price, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(MenuItemId::new())
        .bind(item.chef_id)
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.image_url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_chef(chef_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM menu_items WHERE chef_id = $1 ORDER BY created_at DESC",
        )
        .bind(chef_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
