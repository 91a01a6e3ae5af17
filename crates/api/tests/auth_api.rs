//! Integration tests for authentication and authorization rejection
//! paths. Token validation happens before any database access, so these
//! run against a lazily-connected pool without Postgres.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::body_json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: protected route without a token returns 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/onboarding/catalog")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: garbage bearer token returns 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/notifications")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: non-bearer authorization scheme returns 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn basic_auth_scheme_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/admin/users")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: a valid token with the wrong role returns 403
// ---------------------------------------------------------------------------

#[tokio::test]
async fn employee_token_cannot_reach_admin_routes() {
    use talenthub_api::auth::jwt::generate_access_token;

    let config = common::test_config();
    let token = generate_access_token(7, "employee", None, &config.jwt).unwrap();

    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/admin/users")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: applicants are kept out of the onboarding portal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn applicant_token_cannot_reach_onboarding() {
    use talenthub_api::auth::jwt::generate_access_token;

    let config = common::test_config();
    let token = generate_access_token(9, "applicant", None, &config.jwt).unwrap();

    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/onboarding/catalog")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: managers cannot list another department's step definitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn manager_cannot_list_other_departments_steps() {
    use talenthub_api::auth::jwt::generate_access_token;

    let config = common::test_config();
    let token = generate_access_token(5, "manager", Some("sales"), &config.jwt).unwrap();

    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/onboarding/steps?scope=engineering")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: the base step catalog is HR-only, even for managers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn manager_cannot_list_base_steps() {
    use talenthub_api::auth::jwt::generate_access_token;

    let config = common::test_config();
    let token = generate_access_token(5, "manager", Some("sales"), &config.jwt).unwrap();

    let app = common::build_test_app(common::lazy_pool());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/onboarding/steps")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
