//! # authgate-core
//!
//! Core crate for Authgate. Contains the store contracts, configuration
//! schemas, typed identifiers, the user and session model, and the unified
//! error system with its outward status mapping.
//!
//! This crate has **no** internal dependencies on other Authgate crates.

pub mod config;
pub mod error;
pub mod model;
pub mod result;
pub mod status;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
