/*!
 * # lingvasub - subtitle translation through Lingva Translate
 *
 * A Rust library for translating SubRip (.srt) subtitle files with a
 * Lingva Translate compatible endpoint.
 *
 * ## Features
 *
 * - Split subtitle files into structure (numbering, timestamps) and text
 * - Pack text into size-bounded chunks for the translation endpoint
 * - Protect markup and punctuation from the translator with placeholders
 * - Rebuild the subtitle file with the original numbering and timing
 * - Keep going when a chunk fails, marking the failure in the output
 * - Language labels ("English", "Српски") and ISO 639 codes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle line classification, structure extraction and file IO
 * - `translation`: The translation pipeline:
 *   - `translation::sanitizer`: Placeholder rewriting around the translator
 *   - `translation::chunker`: Size-bounded chunking of content lines
 *   - `translation::reassembly`: Rebuilding records from translated chunks
 *   - `translation::payload`: The request descriptor for one run
 *   - `translation::pipeline`: The end-to-end run
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Language labels and ISO code utilities
 * - `providers`: Translator clients:
 *   - `providers::lingva`: Lingva Translate HTTP client
 *   - `providers::mock`: In-process translators for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{SequenceTimestampMap, SubtitleStructure};
pub use translation::{TranslationPayload, TranslationPipeline};
