/*!
 * Tests for placeholder rewriting around the translator
 */

use lingvasub::translation::LineSanitizer;

#[test]
fn test_sanitize_withQuestionAndItalics_shouldUsePlaceholders() {
    assert_eq!(LineSanitizer::sanitize("<i>Who?</i>"), ";;Who;;;;");
}

#[test]
fn test_round_trip_withSeparatedMarkup_shouldRestoreLine() {
    let lines = [
        "Are you there?",
        "<i>Hold on</i>",
        "<i>Why</i> not?",
        "No markup here.",
    ];

    for line in lines {
        let restored = LineSanitizer::desanitize(&LineSanitizer::sanitize(line));
        assert_eq!(restored, line);
    }
}

#[test]
fn test_round_trip_withExistingSemicolon_shouldBecomeQuestionMark() {
    let restored = LineSanitizer::desanitize(&LineSanitizer::sanitize("Wait; listen"));
    assert_eq!(restored, "Wait? listen");
}

#[test]
fn test_sanitize_withUrl_shouldRemoveIt() {
    assert_eq!(LineSanitizer::sanitize("Visit https://example.com/page today"), "Visit  today");
}

#[test]
fn test_desanitize_withPlaceholderRuns_shouldMatchLongestFirst() {
    assert_eq!(LineSanitizer::desanitize(";;;"), "</i>");
    assert_eq!(LineSanitizer::desanitize(";;"), "<i>");
    assert_eq!(LineSanitizer::desanitize(";"), "?");
    assert_eq!(LineSanitizer::desanitize(";;;;"), "</i>?");
}
