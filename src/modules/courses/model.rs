use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// URL-safe course identifier: lowercase kebab-case, at most 100 characters.
pub static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid slug regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "course_visibility", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(
        length(min = 1, max = 100, message = "slug must be 1-100 characters"),
        regex(path = *SLUG_RE, message = "slug must be lowercase kebab-case")
    )]
    pub slug: String,
    pub tags: Option<Vec<String>>,
    pub visibility: Visibility,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "slug must be 1-100 characters"),
        regex(path = *SLUG_RE, message = "slug must be lowercase kebab-case")
    )]
    pub slug: Option<String>,
    pub tags: Option<Vec<String>>,
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateCourseDto {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "objective is required"))]
    pub objective: String,
    #[validate(length(min = 1, message = "difficulty is required"))]
    pub difficulty: String,
}

/// Draft produced by the generation adapter; not persisted until the client
/// creates the course explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedCourse {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub tags: Vec<String>,
}
