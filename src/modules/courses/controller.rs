use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    Course, CourseListResponse, CreateCourseDto, GenerateCourseDto, GeneratedCourse,
    UpdateCourseDto,
};
use super::repository::CourseRepository;
use super::service::CourseService;

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let repo = CourseRepository::new(state.db.clone());
    let course = CourseService::create_course(&repo, auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List the caller's courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses owned by the caller", body = CourseListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn get_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CourseListResponse>, AppError> {
    let repo = CourseRepository::new(state.db.clone());
    let courses = CourseService::get_courses(&repo, auth_user.user_id()).await?;
    Ok(Json(CourseListResponse { courses }))
}

/// List publicly visible courses
#[utoipa::path(
    get,
    path = "/api/courses/public",
    responses(
        (status = 200, description = "Live courses with PUBLIC visibility", body = CourseListResponse)
    ),
    tag = "Courses"
)]
pub async fn get_public_courses(
    State(state): State<AppState>,
) -> Result<Json<CourseListResponse>, AppError> {
    let repo = CourseRepository::new(state.db.clone());
    let courses = CourseService::get_public_courses(&repo).await?;
    Ok(Json(CourseListResponse { courses }))
}

/// Get a single course by id
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let repo = CourseRepository::new(state.db.clone());
    let course = CourseService::get_course(&repo, auth_user.user_id(), course_id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated successfully", body = Course),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let repo = CourseRepository::new(state.db.clone());
    let course = CourseService::update_course(&repo, auth_user.user_id(), course_id, dto).await?;
    Ok(Json(course))
}

/// Soft-delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let repo = CourseRepository::new(state.db.clone());
    CourseService::delete_course(&repo, auth_user.user_id(), course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Generate a course draft from a brief
#[utoipa::path(
    post,
    path = "/api/courses/generate",
    request_body = GenerateCourseDto,
    responses(
        (status = 200, description = "Generated course draft", body = GeneratedCourse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Generation backend failure", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn generate_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<GenerateCourseDto>,
) -> Result<Json<GeneratedCourse>, AppError> {
    let course = CourseService::generate_course(&state.ai_config, dto).await?;
    Ok(Json(course))
}
