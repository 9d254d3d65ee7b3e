use tracing::{info, instrument};
use uuid::Uuid;

use crate::ai::client::{ChatMessage, GenerationClient};
use crate::ai::parser::{parse_json_object, require_fields};
use crate::ai::prompts;
use crate::config::ai::AiConfig;
use crate::utils::errors::AppError;
use crate::utils::ownership::ensure_owner;

use super::model::{Course, CreateCourseDto, GenerateCourseDto, GeneratedCourse, UpdateCourseDto};
use super::repository::CourseRepository;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(repo, dto), fields(slug = %dto.slug))]
    pub async fn create_course(
        repo: &CourseRepository,
        user_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        if repo.slug_exists(&dto.slug).await? {
            return Err(AppError::conflict(format!(
                "Course with slug '{}' already exists",
                dto.slug
            )));
        }

        let course = repo
            .create(
                &dto.title,
                &dto.description,
                &dto.slug,
                &dto.tags.unwrap_or_default(),
                dto.visibility,
                user_id,
            )
            .await?;

        info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    #[instrument(skip(repo))]
    pub async fn get_courses(
        repo: &CourseRepository,
        user_id: Uuid,
    ) -> Result<Vec<Course>, AppError> {
        repo.find_by_user_id(user_id).await
    }

    /// Public catalog: every live course marked PUBLIC, regardless of owner.
    #[instrument(skip(repo))]
    pub async fn get_public_courses(repo: &CourseRepository) -> Result<Vec<Course>, AppError> {
        repo.find_public().await
    }

    #[instrument(skip(repo))]
    pub async fn get_course(
        repo: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Course, AppError> {
        let course = repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "access this course")?;
        Ok(course)
    }

    #[instrument(skip(repo, dto))]
    pub async fn update_course(
        repo: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course = repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "update this course")?;

        if let Some(slug) = &dto.slug {
            if let Some(existing) = repo.find_by_slug(slug).await? {
                if existing.id != course_id {
                    return Err(AppError::conflict(
                        "Course with the provided slug already exists",
                    ));
                }
            }
        }

        let updated = repo.update(course_id, &dto).await?;
        info!(course_id = %course_id, "Course updated");
        Ok(updated)
    }

    #[instrument(skip(repo))]
    pub async fn delete_course(
        repo: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let course = repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "delete this course")?;

        if !repo.delete(course_id).await? {
            return Err(AppError::internal("Failed to delete course"));
        }

        info!(course_id = %course_id, "Course deleted");
        Ok(())
    }

    /// Draft a course outline with the generation backend. The draft is
    /// returned to the caller; nothing is written to the database.
    #[instrument(skip(ai_config, dto))]
    pub async fn generate_course(
        ai_config: &AiConfig,
        dto: GenerateCourseDto,
    ) -> Result<GeneratedCourse, AppError> {
        let client = GenerationClient::new(ai_config.clone());
        let messages = [
            ChatMessage::system(prompts::course_system_prompt()),
            ChatMessage::user(prompts::course_user_prompt(&dto)),
        ];

        let reply = client.complete_json(&messages).await?;
        let parsed = parse_json_object(&reply)?;
        require_fields(&parsed, &["title", "description", "slug", "tags"])?;

        let course: GeneratedCourse = serde_json::from_value(parsed)
            .map_err(|e| AppError::internal(format!("Failed to parse JSON response: {}", e)))?;

        info!(title = %course.title, "Course draft generated");
        Ok(course)
    }
}
