use std::env;

const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 3600;
const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 7 * 24 * 3600;

/// Signing settings shared by access and refresh tokens.
/// Expiries are in seconds.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| "cursory-dev-secret".to_string()),
            access_token_expiry: expiry_from_env("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY_SECS),
            refresh_token_expiry: expiry_from_env(
                "JWT_REFRESH_EXPIRY",
                DEFAULT_REFRESH_EXPIRY_SECS,
            ),
        }
    }
}

fn expiry_from_env(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
