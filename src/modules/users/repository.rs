use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::UserRow;

const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at, deleted_at";

/// Persistence contract for user accounts. Enforces storage-level invariants
/// only (email uniqueness, soft-delete filtering); authentication rules live
/// in the auth service.
#[derive(Clone)]
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find a live (non-deleted) user by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL",
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Find a user by email regardless of deletion state. Login needs the
    /// deleted row to report a deactivated account instead of a silent miss.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}",
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Email already registered");
                }
            }
            AppError::from(e)
        })?;

        Ok(user)
    }

    /// Partial-field merge; unspecified fields keep their prior value.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 password = COALESCE($3, password),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {USER_COLUMNS}",
        ))
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Soft delete; returns whether a live row was marked.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
