/*!
 * Translator client implementations.
 *
 * - Lingva: HTTP client for a Lingva Translate compatible endpoint
 * - Mock: in-process translators for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for line translators
///
/// Implementations translate one chunk of text per call. Calls are independent,
/// so a failure for one chunk says nothing about the next.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate text between two language codes
    ///
    /// # Arguments
    /// * `source_language` - Code of the source language (e.g. "en")
    /// * `target_language` - Code of the target language (e.g. "sr")
    /// * `text` - The chunk text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the translator
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod lingva;
pub mod mock;
