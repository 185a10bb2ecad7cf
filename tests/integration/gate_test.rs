//! Request gates: bearer token verification and the pre-shared key.

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use uuid::Uuid;

use authgate_auth::{Claims, JwtEncoder};
use authgate_core::model::{User, UserRole};
use authgate_core::types::{DeviceId, InstallationId};

use crate::helpers::*;

const PASSWORD: &str = "Vivid-Otter-Lantern-93";

fn claims_for(user: &User, exp: i64) -> Claims {
    Claims {
        iss: "auth-service".to_string(),
        aud: "auth-service".to_string(),
        sub: user.name.clone(),
        jti: Uuid::new_v4(),
        iat: Utc::now().timestamp(),
        exp,
        role: user.role,
        user_email: user.email.clone(),
        user_id: user.id,
        device_id: DeviceId::new(),
        installation_id: InstallationId::new(),
    }
}

#[tokio::test]
async fn test_missing_header_is_rejected_before_the_handler() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let response = app.call(SIGN_OUT, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.rpc_status(), "16");
    assert_eq!(response.field("title"), "Unauthenticated");

    // The session survived, so the handler never ran
    assert_eq!(app.sessions.len(), 1);
    let refresh = app
        .refresh(&session.access_token, &session.refresh_token)
        .await;
    assert_eq!(refresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let session = app.sign_in("alice@example.com", PASSWORD).await;

    let no_scheme = session.access_token.clone();
    let wrong_scheme = format!("Basic {}", session.access_token);
    let double_space = format!("Bearer  {}", session.access_token);
    let empty_token = "Bearer ".to_string();

    for value in [&no_scheme, &wrong_scheme, &double_space, &empty_token] {
        let response = app
            .call_with_headers(AUTH, None, &[("authorization", value.as_str())])
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{value:?}");
    }

    let bearer = format!("Bearer {}", session.access_token);
    let twice = app
        .call_with_headers(
            AUTH,
            None,
            &[
                ("authorization", bearer.as_str()),
                ("authorization", bearer.as_str()),
            ],
        )
        .await;
    assert_eq!(twice.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_another_key_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let mut other = app.config.auth.clone();
    other.jwt_secret = "some-other-deployment".to_string();
    let forged = JwtEncoder::new(&other)
        .issue_access_token(&user, DeviceId::new(), InstallationId::new())
        .expect("sign");

    let response = app.call(AUTH, None, Some(&forged)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_other_hmac_algorithms_are_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let claims = claims_for(&user, Utc::now().timestamp() + 3600);

    for alg in [Algorithm::HS384, Algorithm::HS512] {
        let token = jsonwebtoken::encode(
            &Header::new(alg),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("sign");

        let response = app.call(AUTH, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{alg:?}");
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let expired = JwtEncoder::new(&app.config.auth)
        .sign(&claims_for(&user, Utc::now().timestamp() - 5))
        .expect("sign");

    let response = app.call(AUTH, None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let valid = JwtEncoder::new(&app.config.auth)
        .sign(&claims_for(&user, Utc::now().timestamp() + 60))
        .expect("sign");
    let response = app.call(AUTH, None, Some(&valid)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_ignores_a_bad_authorization_header() {
    let app = TestApp::new();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);

    let response = app
        .call_with_headers(
            SIGN_IN,
            Some(TestApp::sign_in_body("alice@example.com", PASSWORD)),
            &[("authorization", "Bearer garbage")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_api_key_gate_applies_to_every_method() {
    let app = TestApp::with_api_key();
    app.create_user("alice@example.com", PASSWORD, UserRole::User);
    let body = TestApp::sign_in_body("alice@example.com", PASSWORD);

    let missing = app.call(SIGN_IN, Some(body.clone()), None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.rpc_status(), "16");

    let wrong = app
        .call_with_headers(SIGN_IN, Some(body.clone()), &[("x-api-key", "guess")])
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let signed_in = app
        .call_with_headers(SIGN_IN, Some(body), &[("x-api-key", API_KEY)])
        .await;
    assert_eq!(signed_in.status, StatusCode::OK);
    let access_token = signed_in.field("accessToken");
    let bearer = format!("Bearer {access_token}");

    // A valid key does not stand in for a bearer token
    let key_only = app
        .call_with_headers(AUTH, None, &[("x-api-key", API_KEY)])
        .await;
    assert_eq!(key_only.status, StatusCode::UNAUTHORIZED);

    let token_only = app.call(AUTH, None, Some(&access_token)).await;
    assert_eq!(token_only.status, StatusCode::UNAUTHORIZED);

    let both = app
        .call_with_headers(
            AUTH,
            None,
            &[("x-api-key", API_KEY), ("authorization", bearer.as_str())],
        )
        .await;
    assert_eq!(both.status, StatusCode::OK);
}
