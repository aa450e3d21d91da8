//! `reqwest`-backed implementation of the joke service contract.

use async_trait::async_trait;
use jokebox_core::{JokeUpstream, UpstreamError};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const CHUCK_BASE_URL: &str = "https://api.chucknorris.io";
const DAD_BASE_URL: &str = "https://icanhazdadjoke.com";
const YO_MAMA_BASE_URL: &str = "https://www.yomama-jokes.com";

#[derive(Debug, Deserialize)]
struct ChuckJoke {
    value: String,
}

#[derive(Debug, Deserialize)]
struct DadJoke {
    joke: String,
}

#[derive(Debug, Deserialize)]
struct YoMamaJoke {
    joke: String,
}

/// HTTP client over the three joke services.
///
/// No request timeouts are configured: an unresponsive upstream stalls only
/// the one invocation that is waiting on it.
#[derive(Clone, Debug)]
pub struct JokeApiClient {
    client: Client,
    chuck_base_url: String,
    dad_base_url: String,
    yo_mama_base_url: String,
}

impl Default for JokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JokeApiClient {
    /// Client against the real services.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_urls(CHUCK_BASE_URL, DAD_BASE_URL, YO_MAMA_BASE_URL)
    }

    /// Client with explicit base URLs, used by tests to point at local stubs.
    #[must_use]
    pub fn with_base_urls(
        chuck_base_url: impl Into<String>,
        dad_base_url: impl Into<String>,
        yo_mama_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            chuck_base_url: chuck_base_url.into(),
            dad_base_url: dad_base_url.into(),
            yo_mama_base_url: yo_mama_base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl JokeUpstream for JokeApiClient {
    async fn random_joke(&self) -> Result<String, UpstreamError> {
        let url = format!("{}/jokes/random", self.chuck_base_url);
        let joke: ChuckJoke = self.get_json(self.client.get(&url)).await?;
        Ok(joke.value)
    }

    async fn joke_by_category(&self, category: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/jokes/random", self.chuck_base_url);
        let request = self.client.get(&url).query(&[("category", category)]);
        let joke: ChuckJoke = self.get_json(request).await?;
        Ok(joke.value)
    }

    async fn categories(&self) -> Result<Vec<String>, UpstreamError> {
        let url = format!("{}/jokes/categories", self.chuck_base_url);
        self.get_json(self.client.get(&url)).await
    }

    async fn dad_joke(&self) -> Result<String, UpstreamError> {
        // The dad joke service only answers JSON when asked explicitly.
        let url = format!("{}/", self.dad_base_url);
        let request = self.client.get(&url).header("Accept", "application/json");
        let joke: DadJoke = self.get_json(request).await?;
        Ok(joke.joke)
    }

    async fn yo_mama_joke(&self) -> Result<String, UpstreamError> {
        let url = format!("{}/api/v1/jokes/random/", self.yo_mama_base_url);
        let joke: YoMamaJoke = self.get_json(self.client.get(&url)).await?;
        Ok(joke.joke)
    }
}
