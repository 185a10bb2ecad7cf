//! Session and password handlers.

use axum::Json;
use axum::extract::State;

use authgate_core::error::AppError;

use crate::dto::request::{
    RefreshTokenRequest, ResetPasswordRequest, SetPasswordRequest, SignInRequest,
};
use crate::dto::response::{AuthInfoResponse, RefreshTokenResponse, ResultResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /auth.AuthService/SignIn
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<AuthInfoResponse>, AppError> {
    let result = state
        .session_manager
        .sign_in(
            &req.email,
            &req.password,
            req.device_info.id,
            req.installation_id,
        )
        .await?;
    Ok(Json(result.into()))
}

/// POST /auth.AuthService/Auth
pub async fn auth(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ResultResponse>, AppError> {
    tracing::info!(email = %caller.email, "Authenticating caller");
    state.accounts.authenticate(&caller).await?;
    Ok(Json(ResultResponse::ok()))
}

/// POST /auth.AuthService/RefreshToken
pub async fn refresh_token(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, AppError> {
    let tokens = state
        .session_manager
        .refresh(&caller, &req.refresh_token)
        .await?;
    Ok(Json(tokens.into()))
}

/// POST /auth.AuthService/SignOut
pub async fn sign_out(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ResultResponse>, AppError> {
    state.session_manager.sign_out(&caller).await?;
    Ok(Json(ResultResponse::ok()))
}

/// POST /auth.AuthService/ResetPassword
pub async fn reset_password(
    State(state): State<AppState>,
    _caller: AuthUser,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    state.accounts.reset_password(&req.email).await?;
    Ok(Json(ResultResponse::ok()))
}

/// POST /auth.AuthService/SetPassword
pub async fn set_password(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidatedJson(req): ValidatedJson<SetPasswordRequest>,
) -> Result<Json<ResultResponse>, AppError> {
    state
        .accounts
        .set_password(&caller, &req.email, &req.password)
        .await?;
    Ok(Json(ResultResponse::ok()))
}
