//! The five joke-fetching tools.
//!
//! Error handling is deliberately uneven: `get-joke-by-category` catches
//! every failure and reports it as a text envelope, while the other four let
//! upstream errors escape to the session layer. See DESIGN.md.

use std::sync::Arc;

use async_trait::async_trait;
use jokebox_core::{CategoryCache, Envelope, JokeUpstream, UpstreamError};
use serde_json::{Value, json};

use crate::registry::{Tool, ToolError};

const MISSING_CATEGORY: &str = "The 'category' parameter is required and must be a string.";

fn empty_object_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

/// `get-random-joke`: one random joke from the primary service.
pub struct RandomJoke<U> {
    upstream: Arc<U>,
}

impl<U> RandomJoke<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl<U: JokeUpstream + 'static> Tool for RandomJoke<U> {
    fn name(&self) -> &'static str {
        "get-random-joke"
    }

    fn description(&self) -> &'static str {
        "Get a random joke"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn call(&self, _arguments: &Value) -> Result<Envelope, ToolError> {
        let joke = self.upstream.random_joke().await?;
        Ok(Envelope::text(joke))
    }
}

/// `get-joke-by-category`: a random joke restricted to one of the known
/// categories.
///
/// Validates the `category` argument against the cached category list before
/// calling the upstream. Every failure in the sequence is reported as a text
/// envelope; this tool never returns `Err`.
pub struct JokeByCategory<U> {
    upstream: Arc<U>,
    cache: Arc<CategoryCache<U>>,
}

impl<U> JokeByCategory<U> {
    pub fn new(upstream: Arc<U>, cache: Arc<CategoryCache<U>>) -> Self {
        Self { upstream, cache }
    }
}

impl<U: JokeUpstream> JokeByCategory<U> {
    async fn fetch(&self, arguments: &Value) -> Result<Envelope, UpstreamError> {
        let Some(category) = arguments.get("category").and_then(Value::as_str) else {
            return Ok(Envelope::text(MISSING_CATEGORY));
        };

        let valid = self.cache.get().await?;
        if !valid.iter().any(|c| c == category) {
            return Ok(Envelope::text(format!(
                "Invalid category '{category}'. Valid categories are: {}",
                valid.join(", ")
            )));
        }

        match self.upstream.joke_by_category(category).await {
            Ok(joke) => Ok(Envelope::text(joke)),
            Err(UpstreamError::Status(status)) => Ok(Envelope::text(format!(
                "Failed to fetch joke: HTTP status {status}"
            ))),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<U: JokeUpstream + 'static> Tool for JokeByCategory<U> {
    fn name(&self) -> &'static str {
        "get-joke-by-category"
    }

    fn description(&self) -> &'static str {
        "Get a random joke from a specific category"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Category of the joke"
                }
            },
            "required": ["category"]
        })
    }

    async fn call(&self, arguments: &Value) -> Result<Envelope, ToolError> {
        Ok(self.fetch(arguments).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "get-joke-by-category failed");
            Envelope::text(format!("Error fetching joke: {e}"))
        }))
    }
}

/// `get-categories`: the full category list, comma-separated.
///
/// Calls the upstream directly instead of going through the cache, so this
/// tool and category validation fetch independently. Known inefficiency,
/// kept as-is.
pub struct Categories<U> {
    upstream: Arc<U>,
}

impl<U> Categories<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl<U: JokeUpstream + 'static> Tool for Categories<U> {
    fn name(&self) -> &'static str {
        "get-categories"
    }

    fn description(&self) -> &'static str {
        "List the available joke categories"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn call(&self, _arguments: &Value) -> Result<Envelope, ToolError> {
        let categories = self.upstream.categories().await?;
        Ok(Envelope::text(categories.join(", ")))
    }
}

/// `get-dad-joke`: one joke from the dad joke service.
pub struct DadJoke<U> {
    upstream: Arc<U>,
}

impl<U> DadJoke<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl<U: JokeUpstream + 'static> Tool for DadJoke<U> {
    fn name(&self) -> &'static str {
        "get-dad-joke"
    }

    fn description(&self) -> &'static str {
        "Get a random dad joke"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn call(&self, _arguments: &Value) -> Result<Envelope, ToolError> {
        let joke = self.upstream.dad_joke().await?;
        Ok(Envelope::text(joke))
    }
}

/// `get-yo-mama-joke`: one joke from the yo-mama joke service.
pub struct YoMamaJoke<U> {
    upstream: Arc<U>,
}

impl<U> YoMamaJoke<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl<U: JokeUpstream + 'static> Tool for YoMamaJoke<U> {
    fn name(&self) -> &'static str {
        "get-yo-mama-joke"
    }

    fn description(&self) -> &'static str {
        "Get a random yo mama joke"
    }

    fn input_schema(&self) -> Value {
        empty_object_schema()
    }

    async fn call(&self, _arguments: &Value) -> Result<Envelope, ToolError> {
        let joke = self.upstream.yo_mama_joke().await?;
        Ok(Envelope::text(joke))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Counters {
        random: AtomicUsize,
        by_category: AtomicUsize,
        categories: AtomicUsize,
        dad: AtomicUsize,
        yo_mama: AtomicUsize,
    }

    struct MockUpstream {
        categories: Vec<String>,
        joke: String,
        by_category_result: Option<UpstreamError>,
        calls: Counters,
    }

    impl MockUpstream {
        fn new(categories: &[&str], joke: &str) -> Self {
            Self {
                categories: categories.iter().map(ToString::to_string).collect(),
                joke: joke.to_string(),
                by_category_result: None,
                calls: Counters::default(),
            }
        }

        fn failing_by_category(mut self, error: UpstreamError) -> Self {
            self.by_category_result = Some(error);
            self
        }
    }

    #[async_trait]
    impl JokeUpstream for MockUpstream {
        async fn random_joke(&self) -> Result<String, UpstreamError> {
            self.calls.random.fetch_add(1, Ordering::SeqCst);
            Ok(self.joke.clone())
        }

        async fn joke_by_category(&self, _category: &str) -> Result<String, UpstreamError> {
            self.calls.by_category.fetch_add(1, Ordering::SeqCst);
            match &self.by_category_result {
                None => Ok(self.joke.clone()),
                Some(UpstreamError::Status(s)) => Err(UpstreamError::Status(*s)),
                Some(UpstreamError::Request(m)) => Err(UpstreamError::Request(m.clone())),
                Some(UpstreamError::Malformed(m)) => Err(UpstreamError::Malformed(m.clone())),
            }
        }

        async fn categories(&self) -> Result<Vec<String>, UpstreamError> {
            self.calls.categories.fetch_add(1, Ordering::SeqCst);
            Ok(self.categories.clone())
        }

        async fn dad_joke(&self) -> Result<String, UpstreamError> {
            self.calls.dad.fetch_add(1, Ordering::SeqCst);
            Ok(format!("dad: {}", self.joke))
        }

        async fn yo_mama_joke(&self) -> Result<String, UpstreamError> {
            self.calls.yo_mama.fetch_add(1, Ordering::SeqCst);
            Ok(format!("yo mama: {}", self.joke))
        }
    }

    fn by_category_tool(upstream: Arc<MockUpstream>) -> JokeByCategory<MockUpstream> {
        let cache = Arc::new(CategoryCache::new(Arc::clone(&upstream)));
        JokeByCategory::new(upstream, cache)
    }

    #[tokio::test]
    async fn missing_category_is_a_validation_envelope_with_no_upstream_calls() {
        let upstream = Arc::new(MockUpstream::new(&["dev"], "ha"));
        let tool = by_category_tool(Arc::clone(&upstream));

        let envelope = tool.call(&json!({})).await.unwrap();
        assert_eq!(envelope.first_text(), Some(MISSING_CATEGORY));
        assert_eq!(upstream.calls.categories.load(Ordering::SeqCst), 0);
        assert_eq!(upstream.calls.by_category.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_string_category_is_rejected_like_a_missing_one() {
        let upstream = Arc::new(MockUpstream::new(&["dev"], "ha"));
        let tool = by_category_tool(Arc::clone(&upstream));

        let envelope = tool.call(&json!({ "category": 42 })).await.unwrap();
        assert_eq!(envelope.first_text(), Some(MISSING_CATEGORY));
        assert_eq!(upstream.calls.by_category.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_category_lists_the_valid_ones_without_fetching_a_joke() {
        let upstream = Arc::new(MockUpstream::new(&["dev", "food", "animal"], "ha"));
        let tool = by_category_tool(Arc::clone(&upstream));

        let envelope = tool.call(&json!({ "category": "nonexistent" })).await.unwrap();
        let text = envelope.first_text().unwrap();
        assert!(text.contains("dev, food, animal"));
        assert!(!text.contains("ha"));
        assert_eq!(upstream.calls.by_category.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_category_returns_the_upstream_joke() {
        let upstream = Arc::new(MockUpstream::new(&["dev"], "segfault walks into a bar"));
        let tool = by_category_tool(Arc::clone(&upstream));

        let envelope = tool.call(&json!({ "category": "dev" })).await.unwrap();
        assert_eq!(envelope.first_text(), Some("segfault walks into a bar"));
        assert_eq!(upstream.calls.by_category.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_http_error_becomes_a_status_envelope() {
        let upstream = Arc::new(
            MockUpstream::new(&["dev"], "ha").failing_by_category(UpstreamError::Status(500)),
        );
        let tool = by_category_tool(upstream);

        let envelope = tool.call(&json!({ "category": "dev" })).await.unwrap();
        assert_eq!(
            envelope.first_text(),
            Some("Failed to fetch joke: HTTP status 500")
        );
    }

    #[tokio::test]
    async fn unexpected_error_is_caught_into_an_envelope() {
        let upstream = Arc::new(
            MockUpstream::new(&["dev"], "ha")
                .failing_by_category(UpstreamError::Request("connection reset".into())),
        );
        let tool = by_category_tool(upstream);

        let envelope = tool.call(&json!({ "category": "dev" })).await.unwrap();
        let text = envelope.first_text().unwrap();
        assert!(text.starts_with("Error fetching joke:"));
        assert!(text.contains("connection reset"));
    }

    #[tokio::test]
    async fn category_validation_reuses_the_cache() {
        let upstream = Arc::new(MockUpstream::new(&["dev"], "ha"));
        let tool = by_category_tool(Arc::clone(&upstream));

        tool.call(&json!({ "category": "dev" })).await.unwrap();
        tool.call(&json!({ "category": "dev" })).await.unwrap();
        assert_eq!(upstream.calls.categories.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_categories_joins_with_commas_and_bypasses_the_cache() {
        let upstream = Arc::new(MockUpstream::new(&["dev", "food"], "ha"));
        let tool = Categories::new(Arc::clone(&upstream));

        let envelope = tool.call(&Value::Null).await.unwrap();
        assert_eq!(envelope.first_text(), Some("dev, food"));

        // Two invocations inside any TTL window still hit the upstream twice.
        tool.call(&Value::Null).await.unwrap();
        assert_eq!(upstream.calls.categories.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn random_dad_and_yo_mama_return_their_joke_fields() {
        let upstream = Arc::new(MockUpstream::new(&[], "knock knock"));

        let random = RandomJoke::new(Arc::clone(&upstream));
        let dad = DadJoke::new(Arc::clone(&upstream));
        let yo_mama = YoMamaJoke::new(Arc::clone(&upstream));

        assert_eq!(
            random.call(&Value::Null).await.unwrap().first_text(),
            Some("knock knock")
        );
        assert_eq!(
            dad.call(&Value::Null).await.unwrap().first_text(),
            Some("dad: knock knock")
        );
        assert_eq!(
            yo_mama.call(&Value::Null).await.unwrap().first_text(),
            Some("yo mama: knock knock")
        );
    }
}
