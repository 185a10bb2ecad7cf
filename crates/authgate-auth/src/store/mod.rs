//! In-memory store implementations for tests and single-process setups.

pub mod memory;

pub use memory::{MemorySessionStore, MemoryUserStore};
