//! Store implementations over PostgreSQL.

pub mod session;
pub mod user;

pub use session::PgSessionStore;
pub use user::PgUserStore;
