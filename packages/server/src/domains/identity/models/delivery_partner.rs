use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::UserId;

/// Delivery extension - shares its primary key with `users.id`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPartner {
    #[serde(skip_serializing)]
    pub id: UserId,
    pub vehicle_type: Option<String>,
    pub is_available: bool,
}

impl DeliveryPartner {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM delivery_partners WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
