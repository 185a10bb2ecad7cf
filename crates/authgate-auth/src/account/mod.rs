//! Operations on the caller's own account and the user directory.

pub mod service;

pub use service::AccountService;
