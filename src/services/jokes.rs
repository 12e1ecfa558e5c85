use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::JokesConfig;

#[derive(Debug, Error)]
pub enum JokeError {
    #[error("API_NINJAS_KEY is not configured")]
    MissingApiKey,

    #[error("failed to fetch random joke: {0}")]
    Request(#[from] reqwest::Error),

    #[error("received non-OK response: {0}")]
    Status(u16),

    #[error("no jokes found in the response")]
    Empty,
}

/// Source of filler text for posts created without content
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self) -> Result<String, JokeError>;
}

#[derive(Debug, Deserialize)]
struct JokeEntry {
    joke: String,
}

/// API Ninjas `/v1/jokes` client
pub struct ApiNinjasJokes {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl ApiNinjasJokes {
    pub fn new(config: &JokesConfig) -> Result<Self, JokeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl JokeSource for ApiNinjasJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        let api_key = self.api_key.as_deref().ok_or(JokeError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.url)
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(JokeError::Status(response.status().as_u16()));
        }

        let jokes: Vec<JokeEntry> = response.json().await?;
        jokes
            .into_iter()
            .next()
            .map(|entry| entry.joke)
            .ok_or(JokeError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let jokes = ApiNinjasJokes::new(&JokesConfig::default()).unwrap();
        assert!(matches!(jokes.fetch_joke().await, Err(JokeError::MissingApiKey)));
    }

    #[test]
    fn parses_first_entry_shape() {
        let entries: Vec<JokeEntry> =
            serde_json::from_str(r#"[{"joke":"first"},{"joke":"second"}]"#).unwrap();
        assert_eq!(entries[0].joke, "first");
    }
}
