//! # authgate-auth
//!
//! The authentication core of Authgate.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and new-password policy
//! - `jwt`: access token signing and verification, refresh token generation
//! - `identity`: the verified caller identity handed to handlers
//! - `session`: sign-in, refresh, and sign-out flows
//! - `account`: caller checks, password reset/set, user listing
//! - `store`: in-memory store implementations

pub mod account;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;
pub mod store;

pub use account::AccountService;
pub use identity::AuthenticatedIdentity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, RefreshToken, RefreshTokenGenerator};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{SessionManager, SignInResult, TokenPair};
pub use store::{MemorySessionStore, MemoryUserStore};
