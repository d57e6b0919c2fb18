//! Language utilities for user-facing labels and ISO codes
//!
//! The translation endpoint is keyed by short language codes ("en", "sr").
//! Users pick languages by label, so labels are mapped to codes here.
//! A label that cannot be mapped becomes [`UNKNOWN_LANGUAGE`] instead of an error;
//! rejecting it is left to request validation.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Sentinel code for labels that do not map to a known language
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Labels offered to users, with the code each one maps to
pub const LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("English", "en"),
    ("Српски", "sr"),
];

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a 2- or 3-letter code to an isolang language
fn lookup_code(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let terminology = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == normalized)
                .map(|(_, terminology)| *terminology)
                .unwrap_or(normalized.as_str());
            Language::from_639_3(terminology)
        }
        _ => None,
    }
}

/// Map a user-facing language label to the code sent to the translator
///
/// Accepts the offered labels, ISO 639-1/639-2 codes and English language names.
/// Anything else maps to [`UNKNOWN_LANGUAGE`].
pub fn map_language_label(label: &str) -> String {
    let label = label.trim();

    if let Some((_, code)) = LANGUAGE_LABELS.iter().find(|(name, _)| *name == label) {
        return (*code).to_string();
    }

    if let Ok(code) = normalize_to_part1_or_part2t(label) {
        return code;
    }

    if let Some(lang) = Language::from_name(label) {
        if let Some(code) = lang.to_639_1() {
            return code.to_string();
        }
        return lang.to_639_3().to_string();
    }

    UNKNOWN_LANGUAGE.to_string()
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let lang = lookup_code(code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(match lang.to_639_1() {
        Some(part1) => part1.to_string(),
        None => lang.to_639_3().to_string(),
    })
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup_code(code)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}
