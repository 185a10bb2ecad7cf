//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use authgate_api::{AppState, build_app};
use authgate_auth::{MemorySessionStore, MemoryUserStore, PasswordHasher};
use authgate_core::config::AppConfig;
use authgate_core::model::{User, UserRole};
use authgate_core::types::UserId;

/// Signing key used by every test app.
pub const SECRET: &str = "integration-test-signing-key";

/// Pre-shared key used when the static-key gate is enabled.
pub const API_KEY: &str = "deployment-key";

/// Method paths.
pub const SIGN_IN: &str = "/auth.AuthService/SignIn";
pub const AUTH: &str = "/auth.AuthService/Auth";
pub const REFRESH_TOKEN: &str = "/auth.AuthService/RefreshToken";
pub const SIGN_OUT: &str = "/auth.AuthService/SignOut";
pub const RESET_PASSWORD: &str = "/auth.AuthService/ResetPassword";
pub const SET_PASSWORD: &str = "/auth.AuthService/SetPassword";
pub const LOAD_USERS_INFO: &str = "/auth.AuthService/LoadUsersInfo";

/// Test application context
pub struct TestApp {
    /// The router under test
    pub router: Router,
    /// Backing user store
    pub users: Arc<MemoryUserStore>,
    /// Backing session store
    pub sessions: Arc<MemorySessionStore>,
    /// Configuration the app was built with
    pub config: AppConfig,
}

/// A collected response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body text
    pub text: String,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `grpc-status` header value.
    pub fn rpc_status(&self) -> &str {
        self.headers
            .get("grpc-status")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// A string field of the JSON body.
    pub fn field(&self, name: &str) -> String {
        self.body[name]
            .as_str()
            .unwrap_or_else(|| panic!("missing field {name} in {}", self.text))
            .to_string()
    }
}

/// Tokens returned by a successful sign-in.
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn test_config(api_key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = SECRET.to_string();
    config.auth.api_key = api_key.map(str::to_string);
    config.auth.hash_memory_kib = 1024;
    config.auth.hash_iterations = 1;
    config.database.url = "postgres://unused".to_string();
    config
}

impl TestApp {
    /// App with only the authentication gate.
    pub fn new() -> Self {
        Self::with_config(test_config(None))
    }

    /// App with both gates.
    pub fn with_api_key() -> Self {
        Self::with_config(test_config(Some(API_KEY)))
    }

    fn with_config(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let state = AppState::new(config.clone(), users.clone(), sessions.clone())
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            users,
            sessions,
            config,
        }
    }

    /// Insert an active user with the given password.
    pub fn create_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let hasher = PasswordHasher::from_config(&self.config.auth).expect("hasher");
        let user = User {
            id: UserId::new(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role,
            deleted: false,
            password: hasher.hash(password).expect("hash"),
            blurhash: Some("LEHV6nWB2yk8pyo0adR*.7kCMdnj".to_string()),
        };
        self.users.insert(user.clone());
        user
    }

    /// Call `method` with a JSON body and extra headers.
    pub async fn call_with_headers(
        &self,
        method: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(method)
            .header("content-type", "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = body.map(|b| b.to_string()).unwrap_or_else(|| "{}".to_string());
        let request = builder.body(Body::from(body)).expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Call `method`, optionally with a bearer token.
    pub async fn call(
        &self,
        method: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        match token {
            Some(token) => {
                let value = format!("Bearer {token}");
                self.call_with_headers(method, body, &[("authorization", value.as_str())])
                    .await
            }
            None => self.call_with_headers(method, body, &[]).await,
        }
    }

    /// The `SignIn` body for an account.
    pub fn sign_in_body(email: &str, password: &str) -> Value {
        json!({
            "email": email,
            "password": password,
            "deviceInfo": { "id": Uuid::new_v4() },
            "installationId": Uuid::new_v4(),
        })
    }

    /// Sign in and return the issued tokens.
    pub async fn sign_in(&self, email: &str, password: &str) -> Session {
        let response = self
            .call(SIGN_IN, Some(Self::sign_in_body(email, password)), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        Session {
            access_token: response.field("accessToken"),
            refresh_token: response.field("refreshToken"),
        }
    }

    /// Call `RefreshToken`.
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> TestResponse {
        self.call(
            REFRESH_TOKEN,
            Some(json!({ "refreshToken": refresh_token })),
            Some(access_token),
        )
        .await
    }
}
