//! OpenAI-compatible embedding provider.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// The default OpenAI embeddings API endpoint.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
///
/// Each [`embed_many`](EmbeddingProvider::embed_many) call is a single POST
/// to the `/v1/embeddings` endpoint with the whole batch; the timeout from
/// the [`EmbeddingConfig`] bounds the round trip.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{EmbeddingConfig, OpenAiEmbeddingProvider};
///
/// let provider = OpenAiEmbeddingProvider::new(EmbeddingConfig::new("sk-..."))?;
/// let vectors = provider.embed_many(&["hello world"]).await?;
/// ```
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    config: EmbeddingConfig,
    url: String,
}

impl OpenAiEmbeddingProvider {
    /// Create a provider from an explicit config.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the API key or model name is empty,
    /// or if the HTTP client cannot be constructed.
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config, url: OPENAI_EMBEDDINGS_URL.to_string() })
    }

    /// Point the provider at a different OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

// ── wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

fn provider_error(message: impl Into<String>) -> RagError {
    RagError::Provider { provider: "openai".to_string(), message: message.into() }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), model = %self.config.model, "embedding batch");

        let body = EmbeddingRequest { model: &self.config.model, input: texts };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embedding request failed");
                provider_error(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(%status, "embedding API returned an error");
            return Err(provider_error(format!("API returned {status}: {detail}")));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse embedding response");
            provider_error(format!("malformed response body: {e}"))
        })?;

        if parsed.data.len() != texts.len() {
            return Err(provider_error(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingConfig;

    #[test]
    fn missing_api_key_fails_at_construction() {
        let result = OpenAiEmbeddingProvider::new(EmbeddingConfig::new(""));
        assert!(matches!(result, Err(RagError::Config(_))));
    }

    #[tokio::test]
    async fn empty_batch_short_circuits_without_network() {
        // The URL is unroutable; an empty batch must not touch it.
        let provider = OpenAiEmbeddingProvider::new(EmbeddingConfig::new("sk-test"))
            .unwrap()
            .with_url("http://invalid.localhost:1/v1/embeddings");
        let vectors = provider.embed_many(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }
}
