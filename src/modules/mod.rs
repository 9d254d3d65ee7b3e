pub mod auth;
pub mod course_modules;
pub mod courses;
pub mod resources;
pub mod users;
