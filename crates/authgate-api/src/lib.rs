//! # authgate-api
//!
//! RPC-over-HTTP surface for Authgate built on Axum.
//!
//! Each RPC method is a `POST` route whose path is the fully qualified method
//! name, e.g. `/auth.AuthService/SignIn`. Requests pass the static-key gate
//! (when configured), then the authentication gate, then reach a handler.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
