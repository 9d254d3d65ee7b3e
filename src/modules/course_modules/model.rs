use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::ownership::CourseScoped;

/// An ordered unit of learning inside a course. `order` is advisory for
/// display; duplicates across separate requests are allowed.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub objectives: Vec<String>,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseScoped for Module {
    const ENTITY: &'static str = "Module";

    fn course_id(&self) -> Uuid {
        self.course_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateModuleDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 0, message = "order must be non-negative"))]
    pub order: i32,
    pub objectives: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkCreateModulesDto {
    #[validate(nested)]
    pub modules: Vec<CreateModuleDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateModuleDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "order must be non-negative"))]
    pub order: Option<i32>,
    pub objectives: Option<Vec<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleListResponse {
    pub modules: Vec<Module>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateModulesDto {
    pub suggested_topics: Option<Vec<String>>,
    #[validate(range(min = 1, max = 20, message = "number_of_modules must be 1-20"))]
    pub number_of_modules: u32,
    pub approach: Option<String>,
}

/// Draft module produced by the generation adapter; carries no order or id
/// because nothing is persisted until the client creates the modules.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedModule {
    pub title: String,
    pub description: String,
    pub objectives: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratedModules {
    pub modules: Vec<GeneratedModule>,
}
