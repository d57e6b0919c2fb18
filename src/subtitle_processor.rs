use std::collections::HashMap;
use std::path::Path;
use log::{error, warn, debug};
use crate::file_utils::FileManager;

// @module: Subtitle structure extraction, reading and writing

// @const: Arrow separating start and end time on a timestamp line
pub const TIMESTAMP_ARROW: &str = "-->";

// @const: Colon count at which a line is treated as a timestamp
pub const TIMESTAMP_MIN_COLONS: usize = 4;

/// Returns true if the line expresses a display time range.
///
/// A line counts as a timestamp if it contains `-->` or at least four colons.
/// Reassembly re-inserts exactly the lines this predicate strips, so the
/// thresholds must stay in sync with [`SubtitleStructure::extract`].
pub fn is_timestamp_line(line: &str) -> bool {
    line.contains(TIMESTAMP_ARROW) || line.matches(':').count() >= TIMESTAMP_MIN_COLONS
}

/// Returns true if the token is a bare run of ASCII digits
pub fn is_sequence_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if the trimmed line is a sequence number
pub fn is_sequence_number_line(line: &str) -> bool {
    is_sequence_number(line.trim())
}

/// Mapping from sequence number token to the timestamp line bound to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceTimestampMap {
    bindings: HashMap<String, String>,
}

impl SequenceTimestampMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a sequence number to its timestamp line, returning any previous binding
    pub fn bind(&mut self, sequence_number: impl Into<String>, timestamp: impl Into<String>) -> Option<String> {
        self.bindings.insert(sequence_number.into(), timestamp.into())
    }

    /// Timestamp bound to the sequence number, if any
    pub fn timestamp_for(&self, sequence_number: &str) -> Option<&str> {
        self.bindings.get(sequence_number).map(String::as_str)
    }

    pub fn contains(&self, sequence_number: &str) -> bool {
        self.bindings.contains_key(sequence_number)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// @enum: Extraction state
#[derive(Debug, Clone, Copy)]
enum ExtractState<'a> {
    Idle,
    AwaitingTimestamp(&'a str),
}

/// Subtitle lines split into translatable content and the timestamp side channel
#[derive(Debug, Clone, Default)]
pub struct SubtitleStructure {
    /// Input lines with timestamp lines removed, in original order
    pub content_lines: Vec<String>,

    /// Timestamp recorded for each sequence number
    pub timestamps: SequenceTimestampMap,
}

impl SubtitleStructure {
    /// Separate timestamp lines from content and record sequence number bindings.
    ///
    /// Single pass with two states. A sequence number line arms the extractor,
    /// replacing any number that is still waiting. The next timestamp line binds
    /// to the armed number and disarms it. A number that never meets a timestamp
    /// leaves no entry.
    pub fn extract<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut content_lines = Vec::with_capacity(lines.len());
        let mut timestamps = SequenceTimestampMap::new();
        let mut state = ExtractState::Idle;

        for line in lines {
            let line = line.as_ref();
            let trimmed = line.trim();

            if is_timestamp_line(line) {
                match state {
                    ExtractState::AwaitingTimestamp(seq_num) => {
                        if let Some(previous) = timestamps.bind(seq_num, trimmed) {
                            warn!("Sequence number {} appears more than once, replacing timestamp '{}'", seq_num, previous);
                        }
                        state = ExtractState::Idle;
                    }
                    ExtractState::Idle => {
                        debug!("Timestamp line without sequence number: {}", trimmed);
                    }
                }
                continue;
            }

            if is_sequence_number(trimmed) {
                if let ExtractState::AwaitingTimestamp(unbound) = state {
                    debug!("Sequence number {} has no timestamp before {}", unbound, trimmed);
                }
                state = ExtractState::AwaitingTimestamp(trimmed);
            }

            content_lines.push(line.to_string());
        }

        if let ExtractState::AwaitingTimestamp(unbound) = state {
            debug!("Sequence number {} has no timestamp before end of input", unbound);
        }

        Self { content_lines, timestamps }
    }
}

/// Loads subtitle files, never failing the caller
pub struct SubtitleReader;

impl SubtitleReader {
    /// Ordered lines of the file, or an empty vector if it cannot be read
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Vec<String> {
        match FileManager::read_lines(&path) {
            Ok(lines) => lines,
            Err(e) => {
                error!("Could not read subtitle file {:?}: {:#}", path.as_ref(), e);
                Vec::new()
            }
        }
    }
}

/// Writes reassembled subtitle lines, never failing the caller
pub struct SubtitleWriter;

impl SubtitleWriter {
    /// Write the lines, returning whether the file was written
    pub fn write<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> bool {
        match FileManager::write_lines(&path, lines) {
            Ok(()) => true,
            Err(e) => {
                error!("Error writing to file {:?}: {:#}", path.as_ref(), e);
                false
            }
        }
    }
}
