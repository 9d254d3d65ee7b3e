use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

use super::controller::{
    create_module, create_modules_bulk, delete_module, generate_modules, get_module, get_modules,
    update_module,
};

pub fn init_modules_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module).get(get_modules))
        .route("/bulk", post(create_modules_bulk))
        .route("/generate", post(generate_modules))
        .route(
            "/{module_id}",
            get(get_module).put(update_module).delete(delete_module),
        )
}
