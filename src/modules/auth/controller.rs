use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{MessageResponse, User};
use crate::modules::users::repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RefreshResponse, RegisterRequest,
    SessionInfo, SessionResponse,
};
use super::repository::RefreshTokenRepository;
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    pub status_code: u16,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let users = UserRepository::new(state.db.clone());
    let user = AuthService::register(&users, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive access + refresh tokens
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or deactivated account", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let users = UserRepository::new(state.db.clone());
    let refresh_tokens = RefreshTokenRepository::new(state.db.clone());
    let response = AuthService::login(&users, &refresh_tokens, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = RefreshResponse),
        (status = 401, description = "Invalid, revoked, or expired refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_tokens = RefreshTokenRepository::new(state.db.clone());
    let response =
        AuthService::refresh(&refresh_tokens, &dto.refresh_token, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Logout by revoking the presented refresh token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out successfully", body = MessageResponse),
        (status = 401, description = "Missing refresh token or not the caller's token", body = ErrorResponse),
        (status = 404, description = "Refresh token not found", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<LogoutRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let refresh_tokens = RefreshTokenRepository::new(state.db.clone());
    AuthService::logout(&refresh_tokens, auth_user.user_id(), dto.refresh_token).await?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get the current authenticated session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn session(auth_user: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: auth_user.0,
        session: SessionInfo {
            is_authenticated: true,
            last_activity: Utc::now(),
        },
    })
}
