//! User directory handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use futures::stream;

use authgate_core::error::AppError;

use crate::dto::response::UserInfoResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Media type of streamed replies: one JSON document per line.
pub const NDJSON: &str = "application/x-ndjson";

/// POST /auth.AuthService/LoadUsersInfo
///
/// Streams every user as newline-delimited JSON. The caller's identity is
/// moved into the stream and tags each record sent.
pub async fn load_users_info(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Response, AppError> {
    let caller = caller.into_inner();
    tracing::info!(email = %caller.email, "Loading users info");

    let users = state.accounts.load_users().await?;
    let total = users.len();

    let lines = stream::iter(users.into_iter().enumerate().map(move |(index, user)| {
        let mut line = serde_json::to_vec(&UserInfoResponse::from(user))?;
        line.push(b'\n');
        if index + 1 == total {
            tracing::info!(email = %caller.email, count = total, "Loaded users info");
        }
        Ok::<_, serde_json::Error>(line)
    }));

    Ok(([(CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response())
}
