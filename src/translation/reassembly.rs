/*!
 * Reconstruction of subtitle records from translated chunks.
 *
 * Translated chunk text is a flat stream of whitespace separated tokens where
 * bare numbers are the sequence numbers padded in by the chunker. Each chunk
 * follows the grammar `(Text* SequenceNumber)* Text*`. The reassembler walks
 * the tokens and re-attaches the timestamp recorded for every number.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use crate::subtitle_processor::{is_sequence_number, SequenceTimestampMap};

/// Token of translated chunk text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkToken<'a> {
    /// A bare run of digits
    SequenceNumber(&'a str),
    /// Any other word
    Text(&'a str),
}

/// Splits translated chunk text into tokens
pub struct ChunkTokenizer<'a> {
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> ChunkTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { words: text.split_whitespace() }
    }
}

impl<'a> Iterator for ChunkTokenizer<'a> {
    type Item = ChunkToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.words.next().map(|word| {
            if is_sequence_number(word) {
                ChunkToken::SequenceNumber(word)
            } else {
                ChunkToken::Text(word)
            }
        })
    }
}

/// Result of translating one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Translated and desanitized text
    Translated(String),
    /// The chunk could not be translated
    Failed {
        /// Chunk text as it was sent; its sequence numbers are still restored
        source: String,
        /// Error text emitted as the text of every record the chunk carried
        marker: String,
    },
}

/// What to do with a sequence number that has no recorded timestamp
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingTimestampPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Keep the number as ordinary subtitle text
    TreatAsText,
}

/// Rebuilds the ordered subtitle line sequence
pub struct Reassembler<'m> {
    timestamps: &'m SequenceTimestampMap,
    policy: MissingTimestampPolicy,
    lines: Vec<String>,
    pending_text: Vec<String>,
    records: usize,
}

impl<'m> Reassembler<'m> {
    pub fn new(timestamps: &'m SequenceTimestampMap, policy: MissingTimestampPolicy) -> Self {
        Self {
            timestamps,
            policy,
            lines: Vec::new(),
            pending_text: Vec::new(),
            records: 0,
        }
    }

    /// Number of records emitted so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Reassemble all chunk outcomes in order and return the output lines
    pub fn reassemble(mut self, outcomes: &[ChunkOutcome]) -> Result<Vec<String>, SubtitleError> {
        for outcome in outcomes {
            self.push_outcome(outcome)?;
        }
        Ok(self.finish())
    }

    /// Consume one chunk outcome
    pub fn push_outcome(&mut self, outcome: &ChunkOutcome) -> Result<(), SubtitleError> {
        match outcome {
            ChunkOutcome::Translated(text) => self.push_chunk(text),
            ChunkOutcome::Failed { source, marker } => self.push_failed(source, marker),
        }
    }

    /// Consume one translated chunk
    pub fn push_chunk(&mut self, text: &str) -> Result<(), SubtitleError> {
        for token in ChunkTokenizer::new(text) {
            match token {
                ChunkToken::Text(word) => self.pending_text.push(word.to_string()),
                ChunkToken::SequenceNumber(number) => match self.lookup(number)? {
                    Some(timestamp) => self.start_record(number, timestamp),
                    None => self.pending_text.push(number.to_string()),
                },
            }
        }

        // Text at the end of a chunk belongs to the last record; never drop it
        self.flush_text();
        Ok(())
    }

    /// Consume a chunk that failed to translate.
    ///
    /// Records carried by the chunk keep their number and timestamp, with the
    /// marker as their text. Text continuing the previous record is replaced by
    /// one marker line.
    pub fn push_failed(&mut self, source: &str, marker: &str) -> Result<(), SubtitleError> {
        self.flush_text();
        let mut marker_due = false;
        let mut marked = false;

        for token in ChunkTokenizer::new(source) {
            match token {
                ChunkToken::Text(_) => marker_due = true,
                ChunkToken::SequenceNumber(number) => match self.lookup(number)? {
                    Some(timestamp) => {
                        if marker_due {
                            self.lines.push(marker.to_string());
                            marked = true;
                        }
                        self.start_record(number, timestamp);
                        marker_due = true;
                    }
                    None => marker_due = true,
                },
            }
        }

        if marker_due || !marked {
            self.lines.push(marker.to_string());
        }
        Ok(())
    }

    /// Output lines produced so far
    pub fn finish(mut self) -> Vec<String> {
        self.flush_text();
        self.lines
    }

    /// Timestamp for a sequence number, or `None` when it is to be kept as text
    fn lookup(&self, number: &str) -> Result<Option<&'m str>, SubtitleError> {
        let timestamps = self.timestamps;
        if let Some(timestamp) = timestamps.timestamp_for(number) {
            return Ok(Some(timestamp));
        }

        match self.policy {
            MissingTimestampPolicy::Abort => Err(SubtitleError::MissingTimestamp {
                sequence_number: number.to_string(),
            }),
            MissingTimestampPolicy::TreatAsText => {
                warn!("No timestamp for sequence number {}, keeping it as text", number);
                Ok(None)
            }
        }
    }

    fn start_record(&mut self, number: &str, timestamp: &str) {
        self.flush_text();
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(number.to_string());
        self.lines.push(timestamp.to_string());
        self.records += 1;
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            self.lines.push(self.pending_text.join(" "));
            self.pending_text.clear();
        }
    }
}
