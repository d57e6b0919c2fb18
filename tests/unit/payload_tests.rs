/*!
 * Tests for the translation request descriptor
 */

use std::path::Path;
use lingvasub::errors::AppError;
use lingvasub::translation::TranslationPayload;

#[test]
fn test_new_withOfferedLabels_shouldMapToCodes() {
    let payload = TranslationPayload::new("in.srt", "out.srt", "English", "Српски");

    assert_eq!(payload.source_language(), "en");
    assert_eq!(payload.target_language(), "sr");
    assert_eq!(payload.input_path(), Path::new("in.srt"));
    assert_eq!(payload.output_path(), Path::new("out.srt"));
    assert!(payload.validate().is_ok());
}

#[test]
fn test_validate_withUnknownLanguage_shouldFail() {
    let payload = TranslationPayload::new("in.srt", "out.srt", "Elvish", "sr");

    assert_eq!(payload.source_language(), "unknown");
    assert!(matches!(payload.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_withSameLanguage_shouldFail() {
    let payload = TranslationPayload::new("in.srt", "out.srt", "English", "en");

    assert!(matches!(payload.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_validate_withEmptyOutputPath_shouldFail() {
    let payload = TranslationPayload::new("in.srt", "", "en", "sr");

    assert!(matches!(payload.validate(), Err(AppError::Config(_))));
}
