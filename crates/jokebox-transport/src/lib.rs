//! Axum routes for the SSE streaming endpoint.
//!
//! Provides:
//! - `router` - Connection-open, invocation, tool-listing, and health routes
//! - `AppState` - Session registry + tool registry shared by the handlers

pub mod routes;

pub use routes::{AppState, MESSAGES_PATH, router};
