use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Course, UpdateCourseDto, Visibility};

const COURSE_COLUMNS: &str =
    "id, title, description, slug, tags, visibility, user_id, created_at, updated_at";

/// Persistence contract for courses. Soft-deleted rows are invisible to every
/// finder; slug uniqueness among live rows is backed by a partial unique
/// index so concurrent creates resolve to one winner.
#[derive(Clone)]
pub struct CourseRepository {
    db: PgPool,
}

impl CourseRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        description: &str,
        slug: &str,
        tags: &[String],
        visibility: Visibility,
        user_id: Uuid,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, slug, tags, visibility, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COURSE_COLUMNS}",
        ))
        .bind(title)
        .bind(description)
        .bind(slug)
        .bind(tags)
        .bind(visibility)
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Course with slug '{}' already exists",
                        slug
                    ));
                }
            }
            AppError::from(e)
        })?;

        Ok(course)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND deleted_at IS NULL",
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(course)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE slug = $1 AND deleted_at IS NULL",
        ))
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;

        Ok(course)
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(courses)
    }

    /// Live PUBLIC courses across all owners, newest first.
    pub async fn find_public(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE visibility = 'PUBLIC' AND deleted_at IS NULL
             ORDER BY created_at DESC",
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(courses)
    }

    /// Partial-field merge; the owner is immutable and never updated here.
    pub async fn update(&self, id: Uuid, data: &UpdateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 slug = COALESCE($4, slug),
                 tags = COALESCE($5, tags),
                 visibility = COALESCE($6, visibility),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COURSE_COLUMNS}",
        ))
        .bind(id)
        .bind(data.title.as_deref())
        .bind(data.description.as_deref())
        .bind(data.slug.as_deref())
        .bind(data.tags.as_deref())
        .bind(data.visibility)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Course with the provided slug already exists");
                }
            }
            AppError::from(e)
        })?;

        // The row may have been soft-deleted since the caller's guard read.
        course.ok_or_else(|| AppError::not_found("Course not found"))
    }

    /// Soft delete; `false` means no live row was found, the caller decides
    /// how to report that.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE courses SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM courses WHERE slug = $1 AND deleted_at IS NULL",
        )
        .bind(slug)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }
}
