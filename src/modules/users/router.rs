use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{delete_account, get_profile, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(get_profile).put(update_profile).delete(delete_account),
    )
}
