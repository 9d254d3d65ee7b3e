use cursory::config::jwt::JwtConfig;
use cursory::utils::jwt::create_access_token;
use cursory::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

#[allow(dead_code)]
pub struct TestCourse {
    pub id: Uuid,
    pub slug: String,
    pub user_id: Uuid,
}

pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_course(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    slug: &str,
) -> TestCourse {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (title, description, slug, tags, visibility, user_id)
         VALUES ($1, $2, $3, $4, 'PRIVATE', $5)
         RETURNING id",
    )
    .bind("Test Course")
    .bind("A course used in tests")
    .bind(slug)
    .bind(&["testing".to_string()][..])
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestCourse {
        id,
        slug: slug.to_string(),
        user_id,
    }
}

#[allow(dead_code)]
pub async fn create_test_module(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    order: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO modules (title, description, "order", objectives, course_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id"#,
    )
    .bind("Test Module")
    .bind("A module used in tests")
    .bind(order)
    .bind(&["learn things".to_string()][..])
    .bind(course_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_resource(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO resources (title, description, "type", url, course_id)
         VALUES ($1, $2, 'ARTICLE', $3, $4)
         RETURNING id"#,
    )
    .bind("Test Resource")
    .bind("A resource used in tests")
    .bind("https://example.com/article")
    .bind(course_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_slug() -> String {
    format!("test-course-{}", Uuid::new_v4().simple())
}

/// Bearer header for a freshly minted access token.
#[allow(dead_code)]
pub fn auth_header(user_id: Uuid) -> String {
    let token = create_access_token(user_id, &JwtConfig::from_env()).unwrap();
    format!("Bearer {}", token)
}
