//! Route table and middleware ordering.
//!
//! Every RPC method is mounted at its fully qualified name. Layers run
//! outermost first: trace, call logging, static-key gate, authentication
//! gate, handler.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::post;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{api_key, auth, logging};
use crate::state::AppState;

/// Fully qualified RPC method names.
pub mod methods {
    /// Exchange credentials for tokens.
    pub const SIGN_IN: &str = authgate_core::config::auth::SIGN_IN_METHOD;
    /// Confirm the caller is still active.
    pub const AUTH: &str = "/auth.AuthService/Auth";
    /// Rotate the refresh token.
    pub const REFRESH_TOKEN: &str = "/auth.AuthService/RefreshToken";
    /// End the caller's session.
    pub const SIGN_OUT: &str = "/auth.AuthService/SignOut";
    /// Request a password reset.
    pub const RESET_PASSWORD: &str = "/auth.AuthService/ResetPassword";
    /// Set a new password.
    pub const SET_PASSWORD: &str = "/auth.AuthService/SetPassword";
    /// Stream the user directory.
    pub const LOAD_USERS_INFO: &str = "/auth.AuthService/LoadUsersInfo";
}

/// Build the router with both gates and logging applied.
pub fn build_router(state: AppState) -> Router {
    let mut router = rpc_routes()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        .with_state(state.clone());

    if let Some(gate) = state.api_key_gate.clone() {
        router = router.layer(axum_middleware::from_fn_with_state(
            gate,
            api_key::require_api_key,
        ));
    }

    router
        .layer(axum_middleware::from_fn(logging::request_logging))
        .layer(TraceLayer::new_for_http())
}

fn rpc_routes() -> Router<AppState> {
    Router::new()
        .route(methods::SIGN_IN, post(handlers::auth::sign_in))
        .route(methods::AUTH, post(handlers::auth::auth))
        .route(methods::REFRESH_TOKEN, post(handlers::auth::refresh_token))
        .route(methods::SIGN_OUT, post(handlers::auth::sign_out))
        .route(methods::RESET_PASSWORD, post(handlers::auth::reset_password))
        .route(methods::SET_PASSWORD, post(handlers::auth::set_password))
        .route(
            methods::LOAD_USERS_INFO,
            post(handlers::user::load_users_info),
        )
}
