use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::language_utils::{map_language_label, UNKNOWN_LANGUAGE};

/// Everything one translation run needs to know about its request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPayload {
    input_path: PathBuf,
    output_path: PathBuf,
    source_language: String,
    target_language: String,
}

impl TranslationPayload {
    /// Build a payload from user-facing language labels.
    ///
    /// Labels that cannot be mapped become the `"unknown"` code; use
    /// [`TranslationPayload::validate`] to reject them before a run.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        source_label: &str,
        target_label: &str,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            source_language: map_language_label(source_label),
            target_language: map_language_label(target_label),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Reject requests that cannot produce a useful translation
    pub fn validate(&self) -> Result<(), AppError> {
        if self.source_language == UNKNOWN_LANGUAGE || self.target_language == UNKNOWN_LANGUAGE {
            return Err(AppError::Config(format!(
                "Unsupported language pair: {} -> {}",
                self.source_language, self.target_language
            )));
        }

        if self.source_language == self.target_language {
            return Err(AppError::Config(format!(
                "Source and target language are the same ({}), nothing to translate",
                self.source_language
            )));
        }

        if self.input_path.as_os_str().is_empty() || self.output_path.as_os_str().is_empty() {
            return Err(AppError::Config("Input and output paths are required".to_string()));
        }

        Ok(())
    }
}
