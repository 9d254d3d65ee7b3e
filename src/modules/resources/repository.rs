use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateResourceDto, Resource, UpdateResourceDto};

// "type" is reserved in Postgres and stays quoted.
const RESOURCE_COLUMNS: &str =
    r#"id, title, description, "type", url, course_id, created_at, updated_at"#;

#[derive(Clone)]
pub struct ResourceRepository {
    db: PgPool,
}

impl ResourceRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        course_id: Uuid,
        data: &CreateResourceDto,
    ) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(&format!(
            r#"INSERT INTO resources (title, description, "type", url, course_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {RESOURCE_COLUMNS}"#,
        ))
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.resource_type)
        .bind(&data.url)
        .bind(course_id)
        .fetch_one(&self.db)
        .await?;

        Ok(resource)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError> {
        let resource = sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1 AND deleted_at IS NULL",
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(resource)
    }

    /// Reports whether a live resource with this id exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM resources WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }

    pub async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Resource>, AppError> {
        let resources = sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources
             WHERE course_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC",
        ))
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;

        Ok(resources)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateResourceDto) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(&format!(
            r#"UPDATE resources
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 "type" = COALESCE($4, "type"),
                 url = COALESCE($5, url),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {RESOURCE_COLUMNS}"#,
        ))
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.description.as_deref())
        .bind(data.resource_type)
        .bind(data.url.as_deref())
        .fetch_optional(&self.db)
        .await?;

        // The row may have been soft-deleted since the caller's guard read.
        resource.ok_or_else(|| AppError::not_found("Resource not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE resources SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
