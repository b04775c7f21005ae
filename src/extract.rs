//! Text extraction collaborator.
//!
//! Turning raw upload bytes into plain text is format-specific work (PDF
//! parsing, HTML stripping, ...) that lives outside this crate. The pipeline
//! consumes it through [`TextExtractor`]; [`Utf8TextExtractor`] covers the
//! plain-text case.

use async_trait::async_trait;

use crate::error::{RagError, Result};

/// Extracts plain text from raw file bytes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Extraction`] on unreadable or unsupported input.
    async fn extract(&self, raw: &[u8]) -> Result<String>;
}

/// A [`TextExtractor`] for plain-text files: the bytes must be valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextExtractor;

#[async_trait]
impl TextExtractor for Utf8TextExtractor {
    async fn extract(&self, raw: &[u8]) -> Result<String> {
        String::from_utf8(raw.to_vec())
            .map_err(|e| RagError::Extraction(format!("input is not valid UTF-8: {e}")))
    }
}
