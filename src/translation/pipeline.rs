/*!
 * End-to-end translation of one subtitle file.
 *
 * read -> extract structure -> sanitize -> chunk -> translate -> desanitize
 * -> reassemble -> write
 *
 * A pipeline value runs exactly once: `process_translation` consumes it, and the
 * sequence number map built during the run is owned by that call alone.
 */

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::errors::AppError;
use crate::providers::Translator;
use crate::subtitle_processor::{SubtitleReader, SubtitleStructure, SubtitleWriter};

use super::chunker::{Chunker, DEFAULT_MAX_CHARS};
use super::payload::TranslationPayload;
use super::reassembly::{ChunkOutcome, MissingTimestampPolicy, Reassembler};
use super::sanitizer::LineSanitizer;

/// Prefix of the text emitted in place of a chunk that failed to translate
pub const ERROR_MARKER_PREFIX: &str = "Error: ";

/// Invoked once with the output path after the file has been written
pub type CompletionCallback = Box<dyn FnOnce(&Path) + Send + Sync>;

/// Invoked after each chunk with (chunks done, chunks total)
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Tunables for one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Character budget per translation request
    pub max_chars: usize,
    /// Handling of sequence numbers without a recorded timestamp
    pub missing_timestamp_policy: MissingTimestampPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            missing_timestamp_policy: MissingTimestampPolicy::default(),
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Where the output was (or would have been) written
    pub output_path: PathBuf,
    /// Number of chunks sent to the translator
    pub chunks: usize,
    /// Number of chunks whose records carry an error marker
    pub failed_chunks: usize,
    /// Number of subtitle records in the output
    pub records: usize,
    /// Whether the output file was written
    pub written: bool,
}

/// Subtitle translation pipeline for a single request
pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
    options: PipelineOptions,
    on_complete: Option<CompletionCallback>,
    on_progress: Option<ProgressCallback>,
}

impl TranslationPipeline {
    pub fn new(translator: Arc<dyn Translator>, options: PipelineOptions) -> Self {
        Self {
            translator,
            options,
            on_complete: None,
            on_progress: None,
        }
    }

    /// Register the listener notified when the output file has been written
    pub fn on_complete(mut self, callback: impl FnOnce(&Path) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Register a per-chunk progress listener
    pub fn on_progress(mut self, callback: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Translate the payload's input file into its output file.
    ///
    /// Unreadable input and failed writes are reported through
    /// [`RunReport::written`]; chunk failures become error text in the output.
    /// Only a structural error (a sequence number with no timestamp under
    /// [`MissingTimestampPolicy::Abort`]) fails the run.
    pub async fn process_translation(mut self, payload: TranslationPayload) -> Result<RunReport, AppError> {
        let start_time = Instant::now();
        let mut report = RunReport {
            output_path: payload.output_path().to_path_buf(),
            chunks: 0,
            failed_chunks: 0,
            records: 0,
            written: false,
        };

        let lines = SubtitleReader::read_lines(payload.input_path());
        if lines.is_empty() {
            warn!("Nothing to translate in {:?}", payload.input_path());
            return Ok(report);
        }

        let structure = SubtitleStructure::extract(&lines);
        debug!("Extracted {} content line(s) and {} timestamp binding(s)",
               structure.content_lines.len(), structure.timestamps.len());

        let sanitized: Vec<String> = structure.content_lines
            .iter()
            .map(|line| LineSanitizer::sanitize(line))
            .collect();

        let chunks = Chunker::new(self.options.max_chars).chunk(&sanitized);
        report.chunks = chunks.len();
        info!("Translating {:?} ({} -> {}) in {} chunk(s)",
              payload.input_path(), payload.source_language(), payload.target_language(), chunks.len());

        let outcomes = self.translate_chunks(&chunks, payload.source_language(), payload.target_language()).await;
        report.failed_chunks = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, ChunkOutcome::Failed { .. }))
            .count();

        let mut reassembler = Reassembler::new(&structure.timestamps, self.options.missing_timestamp_policy);
        for outcome in &outcomes {
            reassembler.push_outcome(outcome)?;
        }
        report.records = reassembler.records();
        let output_lines = reassembler.finish();

        report.written = SubtitleWriter::write(payload.output_path(), &output_lines);
        if report.written {
            info!("Wrote {} record(s) to {:?} in {:.1?}",
                  report.records, payload.output_path(), start_time.elapsed());
            if let Some(callback) = self.on_complete.take() {
                callback(payload.output_path());
            }
        }

        Ok(report)
    }

    /// Translate chunks one at a time, in order.
    ///
    /// A failed chunk does not stop the others; its records carry an error marker.
    pub async fn translate_chunks(&self, chunks: &[String], source_language: &str, target_language: &str) -> Vec<ChunkOutcome> {
        let total = chunks.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, chunk) in chunks.iter().enumerate() {
            let outcome = match self.translator.translate(source_language, target_language, chunk).await {
                Ok(translated) => {
                    debug!("Chunk {}/{} translated", index + 1, total);
                    ChunkOutcome::Translated(LineSanitizer::desanitize(&translated))
                }
                Err(e) => {
                    warn!("Chunk {}/{} failed: {}", index + 1, total, e);
                    ChunkOutcome::Failed {
                        source: chunk.clone(),
                        marker: format!("{}{}", ERROR_MARKER_PREFIX, e.user_message()),
                    }
                }
            };
            outcomes.push(outcome);

            if let Some(progress) = &self.on_progress {
                progress(index + 1, total);
            }
        }

        outcomes
    }
}
