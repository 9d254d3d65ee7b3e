use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::modules::users::repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RefreshResponse, RegisterRequest};
use super::repository::RefreshTokenRepository;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto), fields(user.email = %dto.email))]
    pub async fn register(users: &UserRepository, dto: RegisterRequest) -> Result<User, AppError> {
        if users.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = users.create(&dto.name, &dto.email, &password_hash).await?;

        info!(user.id = %user.id, "User registered");

        Ok(user.into_public())
    }

    /// Authenticate and issue both credentials. The refresh token is also
    /// persisted with the same expiry so it can later be revoked.
    #[instrument(skip(users, refresh_tokens, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        users: &UserRepository,
        refresh_tokens: &RefreshTokenRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if user.is_deleted() {
            warn!(user.id = %user.id, "Login attempt on deactivated account");
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = create_access_token(user.id, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, jwt_config)?;

        let expires_at = Utc::now() + Duration::seconds(jwt_config.refresh_token_expiry);
        refresh_tokens
            .create(&refresh_token, user.id, expires_at)
            .await?;

        info!(user.id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: user.into_public(),
        })
    }

    /// Exchange a refresh token for a new access token. The signature and
    /// the persisted record are checked independently: a token that verifies
    /// but was revoked (or whose stored expiry passed) is rejected.
    #[instrument(skip(refresh_tokens, refresh_token, jwt_config))]
    pub async fn refresh(
        refresh_tokens: &RefreshTokenRepository,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_token(refresh_token, jwt_config)
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let record = refresh_tokens
            .find_by_token(refresh_token)
            .await?
            .filter(|record| !record.is_revoked)
            .ok_or_else(|| AppError::unauthorized("Refresh token is invalid or revoked"))?;

        if record.expires_at < Utc::now() {
            return Err(AppError::unauthorized("Refresh token has expired"));
        }

        let access_token = create_access_token(user_id, jwt_config)?;

        Ok(RefreshResponse { access_token })
    }

    /// Revoke the presented refresh token. Idempotent: revoking an
    /// already-revoked token succeeds without changing state.
    #[instrument(skip(refresh_tokens, refresh_token), fields(user.id = %user_id))]
    pub async fn logout(
        refresh_tokens: &RefreshTokenRepository,
        user_id: Uuid,
        refresh_token: Option<String>,
    ) -> Result<(), AppError> {
        let refresh_token =
            refresh_token.ok_or_else(|| AppError::unauthorized("No refresh token found"))?;

        let record = refresh_tokens
            .find_by_token(&refresh_token)
            .await?
            .ok_or_else(|| AppError::not_found("Refresh token not found"))?;

        if record.user_id != user_id {
            return Err(AppError::unauthorized(
                "Refresh token does not belong to this user",
            ));
        }

        refresh_tokens.set_revoked(&refresh_token).await?;

        info!(user.id = %user_id, "User logged out");

        Ok(())
    }
}
