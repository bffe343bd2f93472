//! HTTP tests for the account routers
//! Drive the real routers with an in-memory directory

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::AccountServices;
use crate::application::config::{test_services, test_services_without_signing};
use crate::infra::memory::InMemoryAccountDirectory;
use crate::presentation::router::account_router;

struct TestApp {
    router: Router,
    services: AccountServices,
}

impl TestApp {
    fn new() -> Self {
        Self::with_services(test_services())
    }

    fn with_services(services: AccountServices) -> Self {
        let router = Router::new().nest(
            "/api",
            account_router(InMemoryAccountDirectory::new(), services.clone()),
        );
        Self { router, services }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register an account and return its bearer header
    async fn bearer(&self, email: &str) -> String {
        let (status, body) = self.register("Admin", email, "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
        format!("Bearer {}", body["token"].as_str().unwrap())
    }
}

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

// ============================================================================
// Registration and login
// ============================================================================

mod auth_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login() {
        let app = TestApp::new();

        let (status, registered) = app.register("A", "a@x.com", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(registered["message"], "User registered successfully");
        assert_eq!(registered["user"]["email"], "a@x.com");
        assert_eq!(registered["user"]["name"], "A");
        assert_eq!(registered["user"]["is_active"], true);
        assert!(registered["user"]["age"].is_null());
        let register_token = registered["token"].as_str().unwrap();
        assert!(!register_token.is_empty());
        assert!(!contains_key(&registered, "password"));
        assert!(!contains_key(&registered, "password_hash"));

        let (status, body) = app.login("a@x.com", "wrong-password").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");

        let (status, logged_in) = app.login("a@x.com", "secret1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(logged_in["message"], "Login successful");
        assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);
        let login_token = logged_in["token"].as_str().unwrap();
        assert!(!login_token.is_empty());
        assert_ne!(login_token, register_token);
        assert!(!contains_key(&logged_in, "password"));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let app = TestApp::new();

        let (status, first) = app.register("First", "dup@x.com", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app.register("Second", "dup@x.com", "other-pass").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        // First account keeps its password and name
        let (status, logged_in) = app.login("dup@x.com", "secret1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(logged_in["user"]["id"], first["user"]["id"]);
        assert_eq!(logged_in["user"]["name"], "First");
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let app = TestApp::new();
        app.register("A", "a@x.com", "secret1").await;

        let (status, _) = app.login("A@x.com", "secret1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.register("B", "A@x.com", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_input() {
        let app = TestApp::new();
        app.register("A", "a@x.com", "secret1").await;

        let (status, body) = app.login("not-an-email", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert!(body["details"].as_str().unwrap().contains("email"));

        let (status, body) = app.login("a@x.com", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert_eq!(body["details"], "password: is required");

        // Well-formed but unknown stays a credential failure
        let (status, body) = app.login("ghost@x.com", "secret1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_register_keeps_account_when_token_fails() {
        let app = TestApp::with_services(test_services_without_signing());

        let (status, body) = app.register("A", "a@x.com", "secret1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate token" }));

        // The account was not rolled back
        let (status, body) = app.register("A", "a@x.com", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let app = TestApp::new();

        let (status, body) = app.register("A", "a@x.com", "short").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert!(body["details"].as_str().unwrap().contains("password"));

        let (status, body) = app.register("A", "not-an-email", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].as_str().unwrap().contains("email"));

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": "A", "email": "a@x.com", "password": "secret1", "age": 12 })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].as_str().unwrap().contains("age"));

        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "email": "a@x.com", "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_with_age() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": "Aged", "email": "aged@x.com", "password": "secret1", "age": 30 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["age"], 30);
    }
}

// ============================================================================
// Bearer gate
// ============================================================================

mod gate_tests {
    use super::*;

    async fn assert_rejected(app: &TestApp, authorization: Option<&str>, message: &str) {
        let (status, body) = app
            .send(
                Method::POST,
                "/api/users",
                authorization,
                Some(json!({ "name": "Sneaky", "email": "sneaky@x.com", "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert_eq!(body["error"], message, "{authorization:?}");
    }

    #[tokio::test]
    async fn test_rejections_never_reach_handler() {
        let app = TestApp::new();
        let valid = app.bearer("admin@x.com").await;

        assert_rejected(&app, None, "Authorization header required").await;
        assert_rejected(&app, Some("Token abc"), "Invalid authorization header format").await;
        assert_rejected(&app, Some("Bearer"), "Invalid authorization header format").await;
        assert_rejected(&app, Some("Bearer a b"), "Invalid authorization header format").await;
        assert_rejected(&app, Some("Bearer not.a.jwt"), "Invalid token").await;

        let expired = app
            .services
            .tokens
            .issue_at(1, "admin@x.com", Utc::now() - Duration::hours(25))
            .unwrap();
        assert_rejected(&app, Some(&format!("Bearer {expired}")), "Invalid token").await;

        // The rejected create never ran
        let (status, body) = app
            .send(Method::GET, "/api/users", Some(&valid), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn test_deactivated_account_token() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;
        let victim = app.bearer("victim@x.com").await;

        let (_, me) = app.login("victim@x.com", "secret1").await;
        let victim_id = me["user"]["id"].as_i64().unwrap();

        let (status, _) = app
            .send(
                Method::DELETE,
                &format!("/api/users/{victim_id}"),
                Some(&admin),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        // Token is unexpired but the account is gone
        let (status, body) = app
            .send(Method::GET, "/api/users", Some(&victim), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "User not found or inactive");
    }

    #[tokio::test]
    async fn test_token_from_other_secret() {
        let app = TestApp::new();
        app.bearer("admin@x.com").await;

        let foreign = platform::token::TokenService::new(&platform::token::TokenConfig {
            secret: "someone-else".to_string(),
            ttl: platform::token::DEFAULT_TOKEN_TTL,
        })
        .issue(1, "admin@x.com")
        .unwrap();

        let (status, body) = app
            .send(
                Method::GET,
                "/api/users",
                Some(&format!("Bearer {foreign}")),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_auth_routes_are_public() {
        let app = TestApp::new();
        let (status, _) = app.register("A", "a@x.com", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

// ============================================================================
// User management
// ============================================================================

mod users_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_pagination() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;
        for i in 0..11 {
            app.register(&format!("User {i}"), &format!("user{i}@x.com"), "secret1")
                .await;
        }

        let (status, body) = app
            .send(Method::GET, "/api/users?page=2&limit=5", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["limit"], 5);
        assert_eq!(body["pagination"]["total"], 12);
        assert_eq!(body["pagination"]["pages"], 3);
        assert!(!contains_key(&body, "password_hash"));

        // Out-of-range values fall back to defaults
        let (status, body) = app
            .send(Method::GET, "/api/users?page=0&limit=1000", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_get_user() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;
        let (_, me) = app.login("admin@x.com", "secret1").await;
        let id = me["user"]["id"].as_i64().unwrap();

        let (status, body) = app
            .send(Method::GET, &format!("/api/users/{id}"), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "admin@x.com");

        let (status, body) = app
            .send(Method::GET, "/api/users/abc", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid user ID");

        let (status, body) = app
            .send(Method::GET, "/api/users/9999", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_create_user_returns_no_token() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/users",
                Some(&admin),
                Some(json!({ "name": "New", "email": "new@x.com", "password": "secret1", "age": 44 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user"]["age"], 44);
        assert!(body.get("token").is_none());

        let (status, body) = app
            .send(
                Method::POST,
                "/api/users",
                Some(&admin),
                Some(json!({ "name": "Again", "email": "new@x.com", "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        // Created account can log in
        let (status, _) = app.login("new@x.com", "secret1").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_user() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;
        app.register("Other", "other@x.com", "secret1").await;
        let (_, target) = app.register("Target", "target@x.com", "secret1").await;
        let id = target["user"]["id"].as_i64().unwrap();
        let uri = format!("/api/users/{id}");

        let (status, body) = app
            .send(Method::PUT, &uri, Some(&admin), Some(json!({ "name": "Renamed" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["user"]["name"], "Renamed");
        assert_eq!(body["user"]["email"], "target@x.com");

        let (status, body) = app
            .send(
                Method::PUT,
                &uri,
                Some(&admin),
                Some(json!({ "email": "other@x.com" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        let (status, _) = app
            .send(Method::PUT, &uri, Some(&admin), Some(json!({ "age": 200 })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(
                Method::PUT,
                "/api/users/9999",
                Some(&admin),
                Some(json!({ "name": "Ghost" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_delete_and_reactivate() {
        let app = TestApp::new();
        let admin = app.bearer("admin@x.com").await;
        let (_, target) = app.register("Target", "target@x.com", "secret1").await;
        let id = target["user"]["id"].as_i64().unwrap();
        let uri = format!("/api/users/{id}");

        let (status, body) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully");
        assert_eq!(body["user"]["is_active"], false);

        let (status, _) = app.send(Method::GET, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.login("target@x.com", "secret1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "User account is inactive");

        // Wrong password on an inactive account still reads as bad credentials
        let (_, body) = app.login("target@x.com", "nope123").await;
        assert_eq!(body["error"], "Invalid credentials");

        // Email stays reserved while deactivated
        let (status, _) = app.register("Copy", "target@x.com", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(Method::PUT, &uri, Some(&admin), Some(json!({ "is_active": true })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["is_active"], true);

        let (status, _) = app.login("target@x.com", "secret1").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send(Method::DELETE, "/api/users/9999", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
