use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::PhoneNumber;

/// Local record of the latest OTP challenge for a phone.
///
/// Advisory only: the provider holds the code and decides approval. The row
/// is overwritten on every issuance, so at most one exists per phone.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OtpChallenge {
    pub phone: PhoneNumber,
    pub provider_sid: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl OtpChallenge {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub async fn upsert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO otp_challenges (phone, provider_sid, issued_at, expires_at, consumed_at)
            VALUES ($1, $2, $3, $4, NULL)
            ON CONFLICT (phone) DO UPDATE
            SET provider_sid = EXCLUDED.provider_sid,
                issued_at = EXCLUDED.issued_at,
                expires_at = EXCLUDED.expires_at,
                consumed_at = NULL
            "#,
        )
        .bind(&self.phone)
        .bind(&self.provider_sid)
        .bind(self.issued_at)
        .bind(self.expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_phone(phone: &PhoneNumber, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM otp_challenges WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn mark_consumed(phone: &PhoneNumber, at: DateTime<Utc>, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE otp_challenges SET consumed_at = $2 WHERE phone = $1 AND consumed_at IS NULL",
        )
        .bind(phone)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
