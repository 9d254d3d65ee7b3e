use sqlx::PgPool;

use crate::config::ai::AiConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub ai_config: AiConfig,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    Ok(AppState {
        db: init_db_pool().await?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        ai_config: AiConfig::from_env(),
    })
}
