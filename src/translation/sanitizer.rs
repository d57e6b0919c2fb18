/*!
 * Placeholder rewriting for text sent to the translation endpoint.
 *
 * Question marks and SRT italic tags do not survive the endpoint intact, so they
 * are rewritten to runs of semicolons before sending and restored afterwards.
 * URLs are dropped entirely.
 *
 * The rewrite is lossy for text that already contains `;`, and for placeholders
 * that end up adjacent (`<i>?` becomes `;;;` and comes back as `</i>`).
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// URL-like substrings removed before sending
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://\S+|www\.\S+").unwrap()
});

pub const QUESTION_MARK: &str = "?";
pub const ITALIC_OPEN: &str = "<i>";
pub const ITALIC_CLOSE: &str = "</i>";

pub const QUESTION_MARK_PLACEHOLDER: &str = ";";
pub const ITALIC_OPEN_PLACEHOLDER: &str = ";;";
pub const ITALIC_CLOSE_PLACEHOLDER: &str = ";;;";

/// Reversible line rewriting around the translation call
pub struct LineSanitizer;

impl LineSanitizer {
    /// Rewrite a line into its transport-safe form
    pub fn sanitize(line: &str) -> String {
        let line = line
            .replace(QUESTION_MARK, QUESTION_MARK_PLACEHOLDER)
            .replace(ITALIC_OPEN, ITALIC_OPEN_PLACEHOLDER)
            .replace(ITALIC_CLOSE, ITALIC_CLOSE_PLACEHOLDER);

        URL_REGEX.replace_all(&line, "").into_owned()
    }

    /// Restore markup from placeholders; the longest placeholder is matched first
    pub fn desanitize(text: &str) -> String {
        text.replace(ITALIC_CLOSE_PLACEHOLDER, ITALIC_CLOSE)
            .replace(ITALIC_OPEN_PLACEHOLDER, ITALIC_OPEN)
            .replace(QUESTION_MARK_PLACEHOLDER, QUESTION_MARK)
    }
}
