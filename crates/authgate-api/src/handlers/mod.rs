//! RPC method handlers.

pub mod auth;
pub mod user;
