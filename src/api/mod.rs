//! HTTP API: router, shared state, and the task handler.

pub mod agent;
pub mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
