use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{UpdateProfileDto, User};
use super::repository::UserRepository;
use super::service::UserService;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(auth_user: AuthUser) -> Json<User> {
    Json(auth_user.0)
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    let users = UserRepository::new(state.db.clone());
    let user = UserService::update_profile(&users, auth_user.0.id, dto).await?;
    Ok(Json(user))
}

/// Deactivate the authenticated user's account
#[utoipa::path(
    delete,
    path = "/api/users/me",
    responses(
        (status = 204, description = "Account deactivated"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<StatusCode, AppError> {
    let users = UserRepository::new(state.db.clone());
    UserService::delete_account(&users, auth_user.0.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
