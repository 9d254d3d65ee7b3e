use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{UpdateProfileDto, User};
use super::repository::UserRepository;

pub struct UserService;

impl UserService {
    #[instrument(skip(users, dto), fields(user.id = %user_id))]
    pub async fn update_profile(
        users: &UserRepository,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let password_hash = match dto.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = users
            .update(user_id, dto.name.as_deref(), password_hash.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user.id = %user.id, "Profile updated");

        Ok(user.into_public())
    }

    #[instrument(skip(users), fields(user.id = %user_id))]
    pub async fn delete_account(users: &UserRepository, user_id: Uuid) -> Result<(), AppError> {
        let deleted = users.soft_delete(user_id).await?;
        if !deleted {
            return Err(AppError::internal("Failed to delete account"));
        }

        info!(user.id = %user_id, "Account deactivated");

        Ok(())
    }
}
