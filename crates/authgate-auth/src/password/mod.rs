//! Credential hashing and new-password policy.

pub mod hasher;
pub mod validator;

pub use hasher::{MAX_SECRET_BYTES, PasswordHasher};
pub use validator::PasswordValidator;
