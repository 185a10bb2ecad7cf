//! End-to-end tests driving the router over in-memory stores.

mod auth_test;
mod gate_test;
mod helpers;
mod users_test;
