//! User and session records shared by the stores and the flows.

pub mod session;
pub mod user;

pub use session::SessionRecord;
pub use user::{User, UserRole};
