mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    auth_header, create_test_course, create_test_module, create_test_user, generate_unique_email,
    generate_unique_slug,
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
async fn test_create_module(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules", course.id),
            user.id,
            json!({
                "title": "Getting Started",
                "description": "First steps",
                "order": 1,
                "objectives": ["install the toolchain"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Getting Started");
    assert_eq!(body["order"], 1);
    assert_eq!(body["course_id"], course.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_module_as_non_owner(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let owner = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let stranger = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, owner.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules", course.id),
            stranger.id,
            json!({
                "title": "Sneaky Module",
                "description": "Should not land",
                "order": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_module_under_wrong_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let other_course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let module_id = create_test_module(&mut tx, course.id, 1).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    // The module exists but belongs to a different course.
    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/modules/{}", other_course.id, module_id),
            user.id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Module not found in this course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_modules_ordered(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    create_test_module(&mut tx, course.id, 3).await;
    create_test_module(&mut tx, course.id, 1).await;
    create_test_module(&mut tx, course.id, 2).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/modules", course.id),
            user.id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let orders: Vec<i64> = body["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_create_modules(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules/bulk", course.id),
            user.id,
            json!({
                "modules": [
                    { "title": "Two", "description": "d", "order": 2 },
                    { "title": "One", "description": "d", "order": 1 },
                    { "title": "Three", "description": "d", "order": 3 }
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 3);
    let orders: Vec<i64> = modules.iter().map(|m| m["order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_create_rejects_duplicate_orders(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules/bulk", course.id),
            user.id,
            json!({
                "modules": [
                    { "title": "A", "description": "d", "order": 1 },
                    { "title": "B", "description": "d", "order": 1 }
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Module orders must be unique");

    // Nothing was persisted.
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM modules WHERE course_id = $1",
    )
    .bind(course.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_create_rejects_empty_batch(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules/bulk", course.id),
            user.id,
            json!({ "modules": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_create_rejects_oversized_batch(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let modules: Vec<serde_json::Value> = (0..51)
        .map(|i| json!({ "title": format!("Module {i}"), "description": "d", "order": i }))
        .collect();

    let response = app
        .oneshot(authed_json(
            "POST",
            &format!("/api/courses/{}/modules/bulk", course.id),
            user.id,
            json!({ "modules": modules }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Cannot create more than 50 modules at once");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_module_as_non_owner(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let owner = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let stranger = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, owner.id, &generate_unique_slug()).await;
    let module_id = create_test_module(&mut tx, course.id, 1).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/courses/{}/modules/{}", course.id, module_id),
            stranger.id,
            json!({ "title": "Hijacked" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_module_partial(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let module_id = create_test_module(&mut tx, course.id, 1).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed_json(
            "PUT",
            &format!("/api/courses/{}/modules/{}", course.id, module_id),
            user.id,
            json!({ "order": 7 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["order"], 7);
    assert_eq!(body["title"], "Test Module");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_module(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let module_id = create_test_module(&mut tx, course.id, 1).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/courses/{}/modules/{}", course.id, module_id),
            user.id,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/modules/{}", course.id, module_id),
            user.id,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_module_deleted_mid_request_is_not_found(pool: PgPool) {
    use cursory::modules::course_modules::model::UpdateModuleDto;
    use cursory::modules::course_modules::repository::ModuleRepository;

    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    let course = create_test_course(&mut tx, user.id, &generate_unique_slug()).await;
    let module_id = create_test_module(&mut tx, course.id, 1).await;
    tx.commit().await.unwrap();

    // A delete landing between the guard read and the UPDATE must surface
    // as NOT_FOUND, not a database error.
    sqlx::query("UPDATE modules SET deleted_at = NOW() WHERE id = $1")
        .bind(module_id)
        .execute(&pool)
        .await
        .unwrap();

    let repo = ModuleRepository::new(pool.clone());
    let dto = UpdateModuleDto {
        title: Some("Renamed".to_string()),
        description: None,
        order: None,
        objectives: None,
    };
    let err = repo.update(module_id, &dto).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_module_routes_under_missing_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(authed(
            "GET",
            &format!("/api/courses/{}/modules", Uuid::new_v4()),
            user.id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
