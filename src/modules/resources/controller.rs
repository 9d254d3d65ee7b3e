use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::repository::CourseRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateResourceDto, Resource, ResourceListResponse, UpdateResourceDto};
use super::repository::ResourceRepository;
use super::service::ResourceService;

/// Attach a resource to a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/resources",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created successfully", body = Resource),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn create_resource(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let repo = ResourceRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let resource =
        ResourceService::create_resource(&repo, &courses, auth_user.user_id(), course_id, dto)
            .await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// List a course's resources
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/resources",
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Resources in the course", body = ResourceListResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn get_resources(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ResourceListResponse>, AppError> {
    let repo = ResourceRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let resources =
        ResourceService::get_resources(&repo, &courses, auth_user.user_id(), course_id).await?;
    Ok(Json(ResourceListResponse { resources }))
}

/// Get a single resource
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/resources/{resource_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("resource_id" = Uuid, Path, description = "Resource id")
    ),
    responses(
        (status = 200, description = "The resource", body = Resource),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Resource or course not found", body = ErrorResponse)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn get_resource(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, resource_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Resource>, AppError> {
    let repo = ResourceRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let resource =
        ResourceService::get_resource(&repo, &courses, auth_user.user_id(), course_id, resource_id)
            .await?;
    Ok(Json(resource))
}

/// Update a resource
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/resources/{resource_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("resource_id" = Uuid, Path, description = "Resource id")
    ),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated successfully", body = Resource),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Resource or course not found", body = ErrorResponse)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn update_resource(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, resource_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateResourceDto>,
) -> Result<Json<Resource>, AppError> {
    let repo = ResourceRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let resource = ResourceService::update_resource(
        &repo,
        &courses,
        auth_user.user_id(),
        course_id,
        resource_id,
        dto,
    )
    .await?;
    Ok(Json(resource))
}

/// Soft-delete a resource
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/resources/{resource_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("resource_id" = Uuid, Path, description = "Resource id")
    ),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Resource or course not found", body = ErrorResponse)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, resource_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let repo = ResourceRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    ResourceService::delete_resource(&repo, &courses, auth_user.user_id(), course_id, resource_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
