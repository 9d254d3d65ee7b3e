use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RefreshResponse, RegisterRequest,
    SessionInfo, SessionResponse,
};
use crate::modules::course_modules::model::{
    BulkCreateModulesDto, CreateModuleDto, GenerateModulesDto, GeneratedModule, GeneratedModules,
    Module, ModuleListResponse, UpdateModuleDto,
};
use crate::modules::courses::model::{
    Course, CourseListResponse, CreateCourseDto, GenerateCourseDto, GeneratedCourse,
    UpdateCourseDto, Visibility,
};
use crate::modules::resources::model::{
    CreateResourceDto, Resource, ResourceListResponse, ResourceType, UpdateResourceDto,
};
use crate::modules::users::model::{MessageResponse, UpdateProfileDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::session,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::delete_account,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_public_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::generate_course,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::create_modules_bulk,
        crate::modules::course_modules::controller::get_modules,
        crate::modules::course_modules::controller::get_module,
        crate::modules::course_modules::controller::update_module,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::course_modules::controller::generate_modules,
        crate::modules::resources::controller::create_resource,
        crate::modules::resources::controller::get_resources,
        crate::modules::resources::controller::get_resource,
        crate::modules::resources::controller::update_resource,
        crate::modules::resources::controller::delete_resource,
    ),
    components(
        schemas(
            User,
            UpdateProfileDto,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse,
            LogoutRequest,
            SessionInfo,
            SessionResponse,
            ErrorResponse,
            Course,
            Visibility,
            CreateCourseDto,
            UpdateCourseDto,
            CourseListResponse,
            GenerateCourseDto,
            GeneratedCourse,
            Module,
            CreateModuleDto,
            BulkCreateModulesDto,
            UpdateModuleDto,
            ModuleListResponse,
            GenerateModulesDto,
            GeneratedModule,
            GeneratedModules,
            Resource,
            ResourceType,
            CreateResourceDto,
            UpdateResourceDto,
            ResourceListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User authentication endpoints"),
        (name = "Users", description = "Profile management endpoints"),
        (name = "Courses", description = "Course management endpoints"),
        (name = "Modules", description = "Course module management endpoints"),
        (name = "Resources", description = "Course resource management endpoints")
    ),
    info(
        title = "Cursory API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for authoring courses, with JWT-based authentication and AI-assisted drafting.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
