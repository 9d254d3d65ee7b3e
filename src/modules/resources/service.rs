use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::courses::repository::CourseRepository;
use crate::utils::errors::AppError;
use crate::utils::ownership::{ensure_in_course, ensure_owner};

use super::model::{CreateResourceDto, Resource, UpdateResourceDto};
use super::repository::ResourceRepository;

pub struct ResourceService;

impl ResourceService {
    #[instrument(skip(repo, courses, dto))]
    pub async fn create_resource(
        repo: &ResourceRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        dto: CreateResourceDto,
    ) -> Result<Resource, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "add resources to this course")?;

        let resource = repo.create(course_id, &dto).await?;
        info!(resource_id = %resource.id, "Resource created");
        Ok(resource)
    }

    #[instrument(skip(repo, courses))]
    pub async fn get_resources(
        repo: &ResourceRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<Resource>, AppError> {
        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "access resources in this course")?;

        repo.find_by_course_id(course_id).await
    }

    #[instrument(skip(repo, courses))]
    pub async fn get_resource(
        repo: &ResourceRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        resource_id: Uuid,
    ) -> Result<Resource, AppError> {
        let resource = ensure_in_course(repo.find_by_id(resource_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "access this resource")?;
        Ok(resource)
    }

    #[instrument(skip(repo, courses, dto))]
    pub async fn update_resource(
        repo: &ResourceRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        resource_id: Uuid,
        dto: UpdateResourceDto,
    ) -> Result<Resource, AppError> {
        ensure_in_course(repo.find_by_id(resource_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "update resources in this course")?;

        let updated = repo.update(resource_id, &dto).await?;
        info!(resource_id = %resource_id, "Resource updated");
        Ok(updated)
    }

    #[instrument(skip(repo, courses))]
    pub async fn delete_resource(
        repo: &ResourceRepository,
        courses: &CourseRepository,
        user_id: Uuid,
        course_id: Uuid,
        resource_id: Uuid,
    ) -> Result<(), AppError> {
        ensure_in_course(repo.find_by_id(resource_id).await?, course_id)?;

        let course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        ensure_owner(&course, user_id, "delete resources from this course")?;

        if !repo.delete(resource_id).await? {
            return Err(AppError::internal("Failed to delete resource"));
        }

        info!(resource_id = %resource_id, "Resource deleted");
        Ok(())
    }
}
