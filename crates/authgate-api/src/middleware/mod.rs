//! Axum middleware stack.
//!
//! The two gates are independent layers; either can be mounted without the
//! other.

pub mod api_key;
pub mod auth;
pub mod logging;
