use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::ownership::CourseScoped;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resource_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Pdf,
    Video,
    Webpage,
    Document,
    Presentation,
    CodeRepository,
    Book,
    Article,
    Webinar,
    Tool,
    CourseNotes,
}

/// Supplementary material attached to a course.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseScoped for Resource {
    const ENTITY: &'static str = "Resource";

    fn course_id(&self) -> Uuid {
        self.course_id
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceListResponse {
    pub resources: Vec<Resource>,
}
