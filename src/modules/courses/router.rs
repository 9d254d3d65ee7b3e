use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, generate_course, get_course, get_courses, get_public_courses,
    update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route("/public", get(get_public_courses))
        .route("/generate", post(generate_course))
        .route(
            "/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
