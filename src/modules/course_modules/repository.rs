use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateModuleDto, Module, UpdateModuleDto};

// "order" is a reserved word in Postgres and must stay quoted.
const MODULE_COLUMNS: &str =
    r#"id, title, description, "order", objectives, course_id, created_at, updated_at"#;

#[derive(Clone)]
pub struct ModuleRepository {
    db: PgPool,
}

impl ModuleRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, course_id: Uuid, data: &CreateModuleDto) -> Result<Module, AppError> {
        let module = sqlx::query_as::<_, Module>(&format!(
            r#"INSERT INTO modules (title, description, "order", objectives, course_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MODULE_COLUMNS}"#,
        ))
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.order)
        .bind(data.objectives.as_deref().unwrap_or_default())
        .bind(course_id)
        .fetch_one(&self.db)
        .await?;

        Ok(module)
    }

    /// Insert a validated batch atomically: either every module lands or none
    /// does.
    pub async fn create_many(
        &self,
        course_id: Uuid,
        data: &[CreateModuleDto],
    ) -> Result<Vec<Module>, AppError> {
        let mut tx = self.db.begin().await?;

        let mut modules = Vec::with_capacity(data.len());
        for entry in data {
            let module = sqlx::query_as::<_, Module>(&format!(
                r#"INSERT INTO modules (title, description, "order", objectives, course_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {MODULE_COLUMNS}"#,
            ))
            .bind(&entry.title)
            .bind(&entry.description)
            .bind(entry.order)
            .bind(entry.objectives.as_deref().unwrap_or_default())
            .bind(course_id)
            .fetch_one(&mut *tx)
            .await?;

            modules.push(module);
        }

        tx.commit().await?;

        modules.sort_by_key(|m| m.order);
        Ok(modules)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Module>, AppError> {
        let module = sqlx::query_as::<_, Module>(&format!(
            "SELECT {MODULE_COLUMNS} FROM modules WHERE id = $1 AND deleted_at IS NULL",
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(module)
    }

    pub async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Module>, AppError> {
        let modules = sqlx::query_as::<_, Module>(&format!(
            r#"SELECT {MODULE_COLUMNS} FROM modules
             WHERE course_id = $1 AND deleted_at IS NULL
             ORDER BY "order" ASC"#,
        ))
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;

        Ok(modules)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateModuleDto) -> Result<Module, AppError> {
        let module = sqlx::query_as::<_, Module>(&format!(
            r#"UPDATE modules
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 "order" = COALESCE($4, "order"),
                 objectives = COALESCE($5, objectives),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {MODULE_COLUMNS}"#,
        ))
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.description.as_deref())
        .bind(data.order)
        .bind(data.objectives.as_deref())
        .fetch_optional(&self.db)
        .await?;

        // The row may have been soft-deleted since the caller's guard read.
        module.ok_or_else(|| AppError::not_found("Module not found"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE modules SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
