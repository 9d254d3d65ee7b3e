use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::RefreshTokenRow;

const REFRESH_TOKEN_COLUMNS: &str =
    "id, token, user_id, expires_at, is_revoked, created_at, updated_at";

/// Persistence contract for refresh tokens. Revocation checks and ownership
/// rules are applied by the auth service.
#[derive(Clone)]
pub struct RefreshTokenRepository {
    db: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRow, AppError> {
        let record = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "INSERT INTO refresh_tokens (token, user_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {REFRESH_TOKEN_COLUMNS}",
        ))
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRow>, AppError> {
        let record = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "SELECT {REFRESH_TOKEN_COLUMNS} FROM refresh_tokens WHERE token = $1",
        ))
        .bind(token)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// Set `is_revoked`. Safe to call on an already-revoked token.
    pub async fn set_revoked(&self, token: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE, updated_at = NOW() WHERE token = $1",
        )
        .bind(token)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
