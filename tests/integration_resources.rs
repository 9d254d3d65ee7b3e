mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    auth_header, create_test_course, create_test_resource, create_test_user,
    generate_unique_email, generate_unique_slug,
};
use cursory::config::ai::AiConfig;
use cursory::config::cors::CorsConfig;
use cursory::config::jwt::JwtConfig;
use cursory::router::init_router;
use cursory::state::AppState;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        ai_config: AiConfig::from_env(),
    };
    init_router(state)
}

fn authed_json(method: &str, uri: &str, user_id: Uuid, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", auth_header(user_id))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn authed(method: &str, uri: &str, user_id: Uuid) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth_header(user_id))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_resource(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/resources", course.id),
            user.id,
            json!({
                "title": "Official Docs",
                "description": "Reference documentation",
                "type": "WEBPAGE",
                "url": "https://example.com/docs"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Official Docs");
    assert_eq!(body["type"], "WEBPAGE");
    assert_eq!(body["course_id"], course.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_resource_invalid_url(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/resources", course.id),
            user.id,
            json!({
                "title": "Bad Link",
                "description": "Not a URL",
                "type": "WEBPAGE",
                "url": "not a url"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_resource_as_non_owner(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let owner = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let stranger = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, owner.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/resources", course.id),
            stranger.id,
            json!({
                "title": "Sneaky Resource",
                "description": "Should not land",
                "type": "ARTICLE",
                "url": "https://example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_resource_under_wrong_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let other_course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let resource_id = create_test_resource(&mut tx, course.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/resources/{}", other_course.id, resource_id),
            user.id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Resource not found in this course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_resources_excludes_deleted(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let kept = create_test_resource(&mut tx, course.id).await;
    let removed = create_test_resource(&mut tx, course.id).await;

    sqlx::query("UPDATE resources SET deleted_at = NOW() WHERE id = $1")
        .bind(removed)
        .execute(&mut *tx)
        .await
        .unwrap();

    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/resources", course.id),
            user.id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let resources = body["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["id"], kept.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_resource(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let resource_id = create_test_resource(&mut tx, course.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/courses/{}/resources/{}", course.id, resource_id),
            user.id,
            json!({ "type": "VIDEO", "url": "https://example.com/video" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["type"], "VIDEO");
    assert_eq!(body["url"], "https://example.com/video");
    assert_eq!(body["title"], "Test Resource");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_resource(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let resource_id = create_test_resource(&mut tx, course.id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/courses/{}/resources/{}", course.id, resource_id),
            user.id,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/resources/{}", course.id, resource_id),
            user.id,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resource_exists_ignores_deleted_rows(pool: PgPool) {
    use cursory::modules::resources::repository::ResourceRepository;

    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let resource_id = create_test_resource(&mut tx, course.id).await;
    tx.commit().await.unwrap();

    let repo = ResourceRepository::new(pool.clone());
    assert!(repo.exists(resource_id).await.unwrap());
    assert!(!repo.exists(Uuid::new_v4()).await.unwrap());

    sqlx::query("UPDATE resources SET deleted_at = NOW() WHERE id = $1")
        .bind(resource_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(!repo.exists(resource_id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_resource_deleted_mid_request_is_not_found(pool: PgPool) {
    use cursory::modules::resources::model::UpdateResourceDto;
    use cursory::modules::resources::repository::ResourceRepository;

    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let resource_id = create_test_resource(&mut tx, course.id).await;
    tx.commit().await.unwrap();

    // A delete landing between the guard read and the UPDATE must surface
    // as NOT_FOUND, not a database error.
    sqlx::query("UPDATE resources SET deleted_at = NOW() WHERE id = $1")
        .bind(resource_id)
        .execute(&pool)
        .await
        .unwrap();

    let repo = ResourceRepository::new(pool.clone());
    let dto = UpdateResourceDto {
        title: Some("Renamed".to_string()),
        description: None,
        resource_type: None,
        url: None,
    };
    let err = repo.update(resource_id, &dto).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}
