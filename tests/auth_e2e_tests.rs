//! End-to-end tests for authentication and bearer-token enforcement
//!
//! Token lifetimes are pinned with a fixed clock where the test cares about
//! expiry, so nothing here depends on wall-clock timing.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use course_library::prelude::*;
use serde_json::{Value, json};

const TEST_EMAIL: &str = "writer@example.com";
const TEST_PASSWORD: &str = "correct-horse";

fn test_state(clock: Arc<dyn Clock>, token_ttl_seconds: i64) -> AppState {
    let store = InMemoryStore::default();
    store
        .seed_user(TEST_EMAIL, TEST_PASSWORD)
        .expect("Failed to seed test user");
    let repository = Arc::new(store);

    AppState {
        library: CourseLibraryService::new(repository.clone(), repository.clone()),
        users: UserService::new(repository),
        tokens: TokenStore::new(clock.clone(), token_ttl_seconds),
        routes: Arc::new(ApiRoutes::new()),
        clock,
    }
}

async fn create_test_server() -> TestServer {
    let app = build_router(test_state(Arc::new(SystemClock), 18_000));
    TestServer::try_new(app).expect("Failed to create test server")
}

async fn create_frozen_server(token_ttl_seconds: i64) -> TestServer {
    let frozen = Utc
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("valid fixed instant");
    let app = build_router(test_state(Arc::new(FixedClock(frozen)), token_ttl_seconds));
    TestServer::try_new(app).expect("Failed to create test server")
}

async fn login(server: &TestServer) -> String {
    let response = server
        .post("/api/authentication")
        .json(&json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("login response carries no token")
        .to_string()
}

// =============================================================================
// Login Tests
// =============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token_and_expiry() {
        let server = create_frozen_server(18_000).await;

        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let token = body["token"].as_str().expect("token missing");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        // Five-hour lifetime measured from the frozen clock.
        assert_eq!(body["expires_at"], "2024-06-15T17:00:00Z");
    }

    #[tokio::test]
    async fn test_each_login_issues_a_fresh_token() {
        let server = create_test_server().await;

        let first = login(&server).await;
        let second = login(&server).await;
        assert_ne!(first, second);

        // Issuing a new token does not invalidate the previous one.
        server
            .get("/api")
            .authorization_bearer(&first)
            .await
            .assert_status_ok();
        server
            .get("/api")
            .authorization_bearer(&second)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let server = create_test_server().await;

        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": TEST_EMAIL, "password": "wrong-horse-battery" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Unauthorized: Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_with_unknown_email_reads_the_same_as_wrong_password() {
        let server = create_test_server().await;

        let wrong_password: Value = server
            .post("/api/authentication")
            .json(&json!({ "email": TEST_EMAIL, "password": "wrong-horse-battery" }))
            .await
            .json();
        let unknown_email: Value = server
            .post("/api/authentication")
            .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
            .await
            .json();

        // No user enumeration through differing messages.
        assert_eq!(wrong_password["message"], unknown_email["message"]);
    }

    #[tokio::test]
    async fn test_login_credentials_are_validated_first() {
        let server = create_test_server().await;

        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": TEST_EMAIL, "password": "short" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_FAILURE");

        let failures = body["details"]["failures"]
            .as_array()
            .expect("failures missing");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0]["field"], "password");
        assert_eq!(failures[0]["rule"], "length");
    }

    #[tokio::test]
    async fn test_login_with_empty_credentials_lists_both_required_failures() {
        let server = create_test_server().await;

        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": "", "password": "" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        let failures = body["details"]["failures"]
            .as_array()
            .expect("failures missing");
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0]["field"], "email");
        assert_eq!(failures[0]["rule"], "required");
        assert_eq!(failures[1]["field"], "password");
        assert_eq!(failures[1]["rule"], "required");
    }

    #[tokio::test]
    async fn test_login_rejects_a_malformed_email() {
        let server = create_test_server().await;

        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": "not-an-address", "password": TEST_PASSWORD }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        let failures = body["details"]["failures"]
            .as_array()
            .expect("failures missing");
        assert!(
            failures
                .iter()
                .any(|f| f["field"] == "email" && f["rule"] == "email")
        );
    }
}

// =============================================================================
// Token Enforcement Tests
// =============================================================================

mod token_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_without_token_is_unauthorized() {
        let server = create_test_server().await;

        let response = server.get("/api").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Unauthorized: Missing Authorization header");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let server = create_test_server().await;

        let response = server
            .get("/api")
            .add_header("authorization", "Basic d3JpdGVyOnBhc3M=")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Unauthorized: Authorization header is not a bearer token"
        );
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let server = create_test_server().await;

        let response = server
            .get("/api")
            .authorization_bearer("deadbeefdeadbeefdeadbeefdeadbeef")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["message"], "Unauthorized: Invalid bearer token");
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        // A zero-second lifetime expires the token at the instant it is
        // issued, which a frozen clock makes deterministic.
        let server = create_frozen_server(0).await;
        let token = login(&server).await;

        let response = server.get("/api").authorization_bearer(&token).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body["message"], "Unauthorized: Bearer token has expired");
    }

    #[tokio::test]
    async fn test_every_resource_route_requires_a_token() {
        let server = create_test_server().await;
        let paths = [
            "/api",
            "/api/authors/6a2f64bd-070b-47fc-8a0e-78988f5b483c",
            "/api/authors/6a2f64bd-070b-47fc-8a0e-78988f5b483c/courses",
            "/api/authorcollections/6a2f64bd-070b-47fc-8a0e-78988f5b483c",
            "/api/courses/6a2f64bd-070b-47fc-8a0e-78988f5b483c",
        ];

        for path in paths {
            let response = server.get(path).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_mutations_require_a_token() {
        let server = create_test_server().await;

        server
            .post("/api/authors")
            .json(&json!({
                "first_name": "No",
                "last_name": "Token",
                "date_of_birth": "1970-01-01T00:00:00Z",
                "main_category": "Fiction"
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .delete("/api/authors/6a2f64bd-070b-47fc-8a0e-78988f5b483c")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authentication_route_itself_needs_no_token() {
        let server = create_test_server().await;

        // Reaching the handler proves the route is open; the 401 here is a
        // credential failure, not a missing-token rejection.
        let response = server
            .post("/api/authentication")
            .json(&json!({ "email": TEST_EMAIL, "password": "wrong-horse-battery" }))
            .await;
        let body: Value = response.json();
        assert_eq!(body["message"], "Unauthorized: Invalid email or password");
    }
}
