/*!
 * Subtitle translation pipeline.
 *
 * - `sanitizer`: reversible placeholder rewriting around the translator
 * - `chunker`: packing of content lines into size-bounded chunks
 * - `reassembly`: rebuilding records from translated chunks
 * - `payload`: the request descriptor for one run
 * - `pipeline`: the end-to-end run
 */

pub use self::chunker::{Chunker, DEFAULT_MAX_CHARS};
pub use self::payload::TranslationPayload;
pub use self::pipeline::{PipelineOptions, RunReport, TranslationPipeline};
pub use self::reassembly::{ChunkOutcome, ChunkToken, ChunkTokenizer, MissingTimestampPolicy, Reassembler};
pub use self::sanitizer::LineSanitizer;

pub mod chunker;
pub mod payload;
pub mod pipeline;
pub mod reassembly;
pub mod sanitizer;
