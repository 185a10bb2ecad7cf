//! Per-call logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use authgate_core::status::RPC_STATUS_HEADER;

/// Logs method name, HTTP status, RPC status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let rpc_status = response
        .headers()
        .get(RPC_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("0")
        .to_owned();

    info!(
        method = %method,
        status = response.status().as_u16(),
        rpc_status = %rpc_status,
        duration_ms = start.elapsed().as_millis() as u64,
        "RPC call"
    );

    response
}
