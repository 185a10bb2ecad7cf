//! Store contracts the authentication core depends on.
//!
//! Implemented by `authgate-database` (PostgreSQL) and by the in-memory
//! stores in `authgate-auth`.

pub mod session_store;
pub mod user_store;

pub use session_store::SessionStore;
pub use user_store::UserStore;
