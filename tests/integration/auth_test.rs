//! Sign-in, refresh, and sign-out flows.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use futures::future::join_all;
use serde_json::json;

use authgate_auth::JwtDecoder;
use authgate_core::model::UserRole;

use crate::helpers::*;

const PASSWORD: &str = "Vivid-Otter-Lantern-93";

#[tokio::test]
async fn test_sign_in_issues_token_pair() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let response = app
        .call(
            SIGN_IN,
            Some(TestApp::sign_in_body("alice@example.com", PASSWORD)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.field("userId"), user.id.to_string());
    assert_eq!(response.field("userName"), "alice");
    assert_eq!(response.field("userRole"), "user");
    assert!(!response.field("refreshToken").is_empty());

    let claims = JwtDecoder::new(&app.config.auth)
        .verify_access_token(&response.field("accessToken"))
        .expect("access token verifies");
    assert_eq!(claims.user_email, "alice@example.com");
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.role, UserRole::User);

    let expires_at: chrono::DateTime<Utc> =
        response.field("expiresAt").parse().expect("timestamp");
    let expected = Utc::now() + Duration::days(7);
    assert!((expires_at - expected).num_seconds().abs() < 60);
    assert_eq!(app.sessions.len(), 1);
}

#[tokio::test]
async fn test_unknown_account_and_wrong_password_look_the_same() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let wrong_password = app
        .call(
            SIGN_IN,
            Some(TestApp::sign_in_body("alice@example.com", "not-the-password")),
            None,
        )
        .await;
    let unknown = app
        .call(
            SIGN_IN,
            Some(TestApp::sign_in_body("nobody@example.com", PASSWORD)),
            None,
        )
        .await;

    for response in [&wrong_password, &unknown] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.rpc_status(), "16");
        assert_eq!(response.field("title"), "Incorrect login");
        assert!(response.body.get("detail").is_none());
    }
    assert_eq!(wrong_password.text, unknown.text);
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_deleted_user_cannot_sign_in() {
    let app = TestApp::new();
    app.create_user("gone@example.com", PASSWORD, UserRole::User);
    assert!(app.users.mark_deleted("gone@example.com"));

    let response = app
        .call(
            SIGN_IN,
            Some(TestApp::sign_in_body("gone@example.com", PASSWORD)),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.field("title"), "Incorrect login");
}

#[tokio::test]
async fn test_empty_email_is_invalid_argument() {
    let app = TestApp::new();

    let response = app
        .call(SIGN_IN, Some(TestApp::sign_in_body("", PASSWORD)), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.rpc_status(), "3");
}

#[tokio::test]
async fn test_malformed_sign_in_body_is_invalid_argument() {
    let app = TestApp::new();

    let response = app
        .call(SIGN_IN, Some(json!({ "email": "alice@example.com" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_rotates_and_old_token_is_dead() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let first = app
        .refresh(&session.access_token, &session.refresh_token)
        .await;
    assert_eq!(first.status, StatusCode::OK, "{}", first.text);
    let rotated = first.field("refreshToken");
    assert_ne!(rotated, session.refresh_token);

    let replay = app
        .refresh(&session.access_token, &session.refresh_token)
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.field("title"), "Incorrect login");

    let second = app.refresh(&first.field("accessToken"), &rotated).await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_replayed_refresh_token_has_one_winner() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let attempts = (0..4).map(|_| app.refresh(&session.access_token, &session.refresh_token));
    let results = join_all(attempts).await;

    let winners = results
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    assert_eq!(winners, 1);
    assert!(
        results
            .iter()
            .filter(|r| r.status != StatusCode::OK)
            .all(|r| r.status == StatusCode::UNAUTHORIZED)
    );
}

#[tokio::test]
async fn test_new_sign_in_replaces_previous_session() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let first = app.sign_in("alice@example.com", PASSWORD).await;
    let second = app.sign_in("alice@example.com", PASSWORD).await;

    let stale = app.refresh(&first.access_token, &first.refresh_token).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let current = app
        .refresh(&second.access_token, &second.refresh_token)
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(app.sessions.len(), 1);
}

#[tokio::test]
async fn test_sign_out_revokes_refresh() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let response = app.call(SIGN_OUT, None, Some(&session.access_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"], true);
    assert!(app.sessions.is_empty());

    let refresh = app
        .refresh(&session.access_token, &session.refresh_token)
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_of_another_user_is_rejected() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    app.create_user("bob@example.com", PASSWORD, UserRole::User);
    let alice = app.sign_in("alice@example.com", PASSWORD).await;
    let bob = app.sign_in("bob@example.com", PASSWORD).await;

    let response = app.refresh(&alice.access_token, &bob.refresh_token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_checks_the_caller_is_still_active() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let ok = app.call(AUTH, None, Some(&session.access_token)).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["result"], true);

    app.users.mark_deleted("alice@example.com");

    let gone = app.call(AUTH, None, Some(&session.access_token)).await;
    assert_eq!(gone.status, StatusCode::UNAUTHORIZED);

    let refresh = app
        .refresh(&session.access_token, &session.refresh_token)
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}
