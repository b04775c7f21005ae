//! Configuration for the embedding provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// The default model for OpenAI-compatible embeddings.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// The default embedding request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for an embedding backend, passed explicitly into the
/// provider constructor.
///
/// Nothing here is read from ambient process state; a missing key is a
/// [`RagError::Config`] at construction time, not a surprise at first call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// API key for the embedding backend.
    pub api_key: String,
    /// Model name, e.g. `text-embedding-3-small`.
    pub model: String,
    /// Timeout for the single embedding round trip.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl EmbeddingConfig {
    /// Create a config with the given API key and the default model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the config.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the API key or model name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(RagError::Config("API key is not set".to_string()));
        }
        if self.model.is_empty() {
            return Err(RagError::Config("embedding model is not set".to_string()));
        }
        Ok(())
    }
}
