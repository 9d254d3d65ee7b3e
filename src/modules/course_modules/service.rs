use std::collections::HashSet;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::ai::client::{ChatMessage, GenerationClient};
use crate::ai::parser::{parse_json_object, require_object_array};
use crate::ai::prompts;
use crate::config::ai::AiConfig;
use crate::modules::courses::repository::CourseRepository;
use crate::utils::errors::AppError;
use crate::utils::ownership::{ensure_in_course, ensure_owner};

use super::model::{
    CreateModuleDto, GenerateModulesDto, GeneratedModules, Module, UpdateModuleDto,
};
use super::repository::ModuleRepository;

const MAX_BULK_MODULES: usize = 50;

pub struct ModuleService;

impl ModuleService {
    #[instrument(skip(repo, courses, dto))]
    pub async fn create_module(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        dto: CreateModuleDto,
    ) -> Result<Module, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "create modules in this course")?;

        let module = repo.create(course_id, &dto).await?;
        info!(module_id = %module.id, "Module created");
        Ok(module)
    }

    /// Create a batch of modules in one transaction. The batch is validated
    /// in full before any row is written.
    #[instrument(skip(repo, courses, modules))]
    pub async fn create_modules_bulk(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        modules: Vec<CreateModuleDto>,
    ) -> Result<Vec<Module>, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "create modules in this course")?;

        if modules.is_empty() {
            return Err(AppError::bad_request(
                "Modules array is required and cannot be empty",
            ));
        }
        if modules.len() > MAX_BULK_MODULES {
            return Err(AppError::bad_request(
                "Cannot create more than 50 modules at once",
            ));
        }

        let orders: HashSet<i32> = modules.iter().map(|m| m.order).collect();
        if orders.len() != modules.len() {
            return Err(AppError::bad_request("Module orders must be unique"));
        }

        let created = repo.create_many(course_id, &modules).await?;
        info!(count = created.len(), "Modules created in bulk");
        Ok(created)
    }

    #[instrument(skip(repo, courses))]
    pub async fn get_modules(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<Module>, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "access modules in this course")?;

        repo.find_by_course_id(course_id).await
    }

    #[instrument(skip(repo, courses))]
    pub async fn get_module(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        module_id: Uuid,
    ) -> Result<Module, AppError> {
        let module = ensure_in_course(repo.find_by_id(module_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "access this module")?;
        Ok(module)
    }

    #[instrument(skip(repo, courses, dto))]
    pub async fn update_module(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        module_id: Uuid,
        dto: UpdateModuleDto,
    ) -> Result<Module, AppError> {
        ensure_in_course(repo.find_by_id(module_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "update this module")?;

        let updated = repo.update(module_id, &dto).await?;
        info!(module_id = %module_id, "Module updated");
        Ok(updated)
    }

    #[instrument(skip(repo, courses))]
    pub async fn delete_module(
        repo: &ModuleRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        module_id: Uuid,
    ) -> Result<(), AppError> {
        ensure_in_course(repo.find_by_id(module_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "delete this module")?;

        if !repo.delete(module_id).await? {
            return Err(AppError::internal("Failed to delete module"));
        }

        info!(module_id = %module_id, "Module deleted");
        Ok(())
    }

    /// Draft modules for an existing course. The caller must own the course;
    /// drafts are returned to the client and never persisted here.
    #[instrument(skip(courses, ai_config, dto))]
    pub async fn generate_modules(
        courses: &CourseRepository,
        ai_config: &AiConfig,
        user_id: Uuid,
        course_id: Uuid,
        dto: GenerateModulesDto,
    ) -> Result<GeneratedModules, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "generate modules for this course")?;

        let client = GenerationClient::new(ai_config.clone());
        let messages = [
            ChatMessage::system(prompts::modules_system_prompt()),
            ChatMessage::user(prompts::modules_user_prompt(&course, &dto)),
        ];

        let reply = client.complete_json(&messages).await?;
        let parsed = parse_json_object(&reply)?;
        require_object_array(&parsed, "modules", &["title", "description", "objectives"])?;

        let modules: GeneratedModules = serde_json::from_value(parsed)
            .map_err(|e| AppError::internal(format!("Failed to parse JSON response: {}", e)))?;

        info!(count = modules.modules.len(), "Module drafts generated");
        Ok(modules)
    }
}
