//! Core type definitions used across the Authgate workspace.

pub mod id;

pub use id::*;
