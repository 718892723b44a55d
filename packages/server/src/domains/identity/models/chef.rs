use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::UserId;

/// Chef extension - shares its primary key with `users.id`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChefProfile {
    #[serde(skip_serializing)]
    pub id: UserId,
    pub bio: String,
    pub is_available: bool,
}

impl ChefProfile {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM chefs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
