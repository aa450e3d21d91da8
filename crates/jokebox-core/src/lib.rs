//! Core abstractions for the jokebox streaming joke server.
//!
//! This crate provides the fundamental building blocks:
//! - `Envelope` / `Content` - Uniform response envelope for tool output
//! - `CallToolRequest` - Wire type for tool invocations
//! - `JokeUpstream` - Contract over the third-party joke services
//! - `CategoryCache` - TTL memoization of the upstream category list

pub mod cache;
pub mod envelope;
pub mod protocol;
pub mod upstream;

pub use cache::{CategoryCache, Clock, SystemClock};
pub use envelope::{Content, Envelope};
pub use protocol::CallToolRequest;
pub use upstream::{JokeUpstream, UpstreamError};
