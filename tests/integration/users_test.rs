//! Password and user directory operations.

use axum::http::StatusCode;
use serde_json::json;

use authgate_core::model::UserRole;

use crate::helpers::*;

const PASSWORD: &str = "Vivid-Otter-Lantern-93";
const NEW_PASSWORD: &str = "Quartz-Heron-Meadow-41";

#[tokio::test]
async fn test_set_own_password() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let response = app
        .call(
            SET_PASSWORD,
            Some(json!({ "email": "alice@example.com", "password": NEW_PASSWORD })),
            Some(&session.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);

    let old = app
        .call(
            SIGN_IN,
            Some(TestApp::sign_in_body("alice@example.com", PASSWORD)),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.sign_in("alice@example.com", NEW_PASSWORD).await;
}

#[tokio::test]
async fn test_set_password_for_another_user_requires_admin() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    app.create_user("bob@example.com", PASSWORD, UserRole::User);
    app.create_user("root@example.com", PASSWORD, UserRole::Admin);

    let alice = app.sign_in("alice@example.com", PASSWORD).await;
    let denied = app
        .call(
            SET_PASSWORD,
            Some(json!({ "email": "bob@example.com", "password": NEW_PASSWORD })),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.rpc_status(), "7");

    let admin = app.sign_in("root@example.com", PASSWORD).await;
    let allowed = app
        .call(
            SET_PASSWORD,
            Some(json!({ "email": "bob@example.com", "password": NEW_PASSWORD })),
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);

    app.sign_in("bob@example.com", NEW_PASSWORD).await;
}

#[tokio::test]
async fn test_weak_password_is_refused() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let too_long = "Vivid-Otter-".repeat(7);
    for weak in ["short", "password123", too_long.as_str()] {
        let response = app
            .call(
                SET_PASSWORD,
                Some(json!({ "email": "alice@example.com", "password": weak })),
                Some(&session.access_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{weak}");
        assert_eq!(response.field("title"), "Invalid password");
    }

    app.sign_in("alice@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_reset_password() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let known = app
        .call(
            RESET_PASSWORD,
            Some(json!({ "email": "alice@example.com" })),
            Some(&session.access_token),
        )
        .await;
    assert_eq!(known.status, StatusCode::OK);

    let unknown = app
        .call(
            RESET_PASSWORD,
            Some(json!({ "email": "nobody@example.com" })),
            Some(&session.access_token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_load_users_info_streams_ndjson() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    app.create_user("bob@example.com", PASSWORD, UserRole::Admin);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let response = app
        .call(LOAD_USERS_INFO, None, Some(&session.access_token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["content-type"], "application/x-ndjson");

    let lines: Vec<serde_json::Value> = response
        .text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(lines.len(), 2);

    let mut emails: Vec<&str> = lines.iter().filter_map(|l| l["email"].as_str()).collect();
    emails.sort();
    assert_eq!(emails, ["alice@example.com", "bob@example.com"]);
    assert!(lines.iter().all(|l| l.get("password").is_none()));
}

#[tokio::test]
async fn test_load_users_info_requires_token() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let response = app.call(LOAD_USERS_INFO, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
