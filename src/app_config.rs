use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::translation::{MissingTimestampPolicy, PipelineOptions, DEFAULT_MAX_CHARS};
use crate::providers::lingva::DEFAULT_ENDPOINT;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language (label or ISO code)
    pub source_language: String,

    /// Target language (label or ISO code)
    pub target_language: String,

    /// Translator endpoint config
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the translation endpoint and chunking
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Handling of sequence numbers that have no timestamp
    #[serde(default)]
    pub missing_timestamp_policy: MissingTimestampPolicy,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
            missing_timestamp_policy: MissingTimestampPolicy::default(),
        }
    }
}

impl TranslatorConfig {
    /// Pipeline tunables derived from this config
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_chars: self.max_chars_per_request,
            missing_timestamp_policy: self.missing_timestamp_policy,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_chars_per_request() -> usize {
    // Works well with Lingva's URL length limits
    DEFAULT_MAX_CHARS
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration, creating a default file when none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let source = crate::language_utils::map_language_label(&self.source_language);
        let target = crate::language_utils::map_language_label(&self.target_language);

        crate::language_utils::get_language_name(&source)
            .with_context(|| format!("Unsupported source language: {}", self.source_language))?;
        crate::language_utils::get_language_name(&target)
            .with_context(|| format!("Unsupported target language: {}", self.target_language))?;

        if source == target {
            return Err(anyhow!("Source and target language are the same: {}", source));
        }

        if self.translator.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be greater than zero"));
        }

        Url::parse(&self.translator.endpoint)
            .with_context(|| format!("Invalid translator endpoint: {}", self.translator.endpoint))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "sr".to_string(),
            translator: TranslatorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
