//! Sign-in, refresh, and sign-out flows.

pub mod manager;

pub use manager::{SessionManager, SignInResult, TokenPair};
