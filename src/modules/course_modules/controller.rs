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

use super::model::{
    BulkCreateModulesDto, CreateModuleDto, GenerateModulesDto, GeneratedModules, Module,
    ModuleListResponse, UpdateModuleDto,
};
use super::repository::ModuleRepository;
use super::service::ModuleService;

/// Create a module in a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = CreateModuleDto,
    responses(
        (status = 201, description = "Module created successfully", body = Module),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn create_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<(StatusCode, Json<Module>), AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let module =
        ModuleService::create_module(&repo, &courses, auth_user.user_id(), course_id, dto).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// Create up to 50 modules at once
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/modules/bulk",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = BulkCreateModulesDto,
    responses(
        (status = 201, description = "Modules created successfully", body = ModuleListResponse),
        (status = 400, description = "Empty batch, oversized batch, or duplicate orders", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn create_modules_bulk(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<BulkCreateModulesDto>,
) -> Result<(StatusCode, Json<ModuleListResponse>), AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let modules = ModuleService::create_modules_bulk(
        &repo,
        &courses,
        auth_user.user_id(),
        course_id,
        dto.modules,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ModuleListResponse { modules })))
}

/// List a course's modules ordered by their display order
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Modules in the course", body = ModuleListResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn get_modules(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ModuleListResponse>, AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let modules =
        ModuleService::get_modules(&repo, &courses, auth_user.user_id(), course_id).await?;
    Ok(Json(ModuleListResponse { modules }))
}

/// Get a single module
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/modules/{module_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("module_id" = Uuid, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "The module", body = Module),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Module or course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn get_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, module_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Module>, AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let module =
        ModuleService::get_module(&repo, &courses, auth_user.user_id(), course_id, module_id)
            .await?;
    Ok(Json(module))
}

/// Update a module
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/modules/{module_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("module_id" = Uuid, Path, description = "Module id")
    ),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated successfully", body = Module),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Module or course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn update_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, module_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateModuleDto>,
) -> Result<Json<Module>, AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    let module = ModuleService::update_module(
        &repo,
        &courses,
        auth_user.user_id(),
        course_id,
        module_id,
        dto,
    )
    .await?;
    Ok(Json(module))
}

/// Soft-delete a module
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/modules/{module_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course id"),
        ("module_id" = Uuid, Path, description = "Module id")
    ),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Module or course not found", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn delete_module(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, module_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let repo = ModuleRepository::new(state.db.clone());
    let courses = CourseRepository::new(state.db.clone());
    ModuleService::delete_module(&repo, &courses, auth_user.user_id(), course_id, module_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Generate module drafts for a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/modules/generate",
    params(("course_id" = Uuid, Path, description = "Course id")),
    request_body = GenerateModulesDto,
    responses(
        (status = 200, description = "Generated module drafts", body = GeneratedModules),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Generation backend failure", body = ErrorResponse)
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
pub async fn generate_modules(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<GenerateModulesDto>,
) -> Result<Json<GeneratedModules>, AppError> {
    let courses = CourseRepository::new(state.db.clone());
    let modules = ModuleService::generate_modules(
        &courses,
        &state.ai_config,
        auth_user.user_id(),
        course_id,
        dto,
    )
    .await?;
    Ok(Json(modules))
}
