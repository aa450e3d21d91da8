//! Contract over the third-party joke services.

use async_trait::async_trait;
use thiserror::Error;

/// Upstream fetch error.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned status {0}")]
    Status(u16),
    /// The request could not be sent or the connection failed.
    #[error("upstream request failed: {0}")]
    Request(String),
    /// The response body did not have the expected shape.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// The third-party joke services consumed as opaque collaborators.
///
/// The production implementation in `jokebox-upstream` talks plain HTTP with
/// JSON responses; tests substitute in-memory fakes.
#[async_trait]
pub trait JokeUpstream: Send + Sync {
    /// Fetch one random joke.
    async fn random_joke(&self) -> Result<String, UpstreamError>;

    /// Fetch one random joke restricted to a category.
    async fn joke_by_category(&self, category: &str) -> Result<String, UpstreamError>;

    /// List the categories the random-joke service knows about.
    async fn categories(&self) -> Result<Vec<String>, UpstreamError>;

    /// Fetch one dad joke.
    async fn dad_joke(&self) -> Result<String, UpstreamError>;

    /// Fetch one yo-mama joke.
    async fn yo_mama_joke(&self) -> Result<String, UpstreamError>;
}
