//! HTTP clients for the third-party joke services.
//!
//! Provides `JokeApiClient`, the `reqwest`-backed implementation of the
//! `JokeUpstream` trait from `jokebox-core`.

pub mod http;

pub use http::JokeApiClient;
