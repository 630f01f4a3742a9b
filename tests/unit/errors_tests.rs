/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use wordsik::errors::{ConfigError, DocumentError};

#[test]
fn test_documentError_notFound_shouldDisplayPath() {
    let error = DocumentError::NotFound(PathBuf::from("data/vocabulary/en/grade-1/week-1.json"));
    let display = format!("{}", error);

    assert!(display.contains("File not found"));
    assert!(display.contains("week-1.json"));
}

#[test]
fn test_documentError_parse_shouldIncludeParserMessage() {
    let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
    let error = DocumentError::Parse {
        path: PathBuf::from("broken.json"),
        source,
    };

    let display = format!("{}", error);

    assert!(display.starts_with("Invalid JSON in broken.json:"));
    assert_eq!(error.path(), &PathBuf::from("broken.json"));
}

#[test]
fn test_configError_shouldDisplayField() {
    let error = ConfigError::InvalidLimit {
        field: "max_word_length",
        message: "must be greater than zero".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid length limit for max_word_length: must be greater than zero"
    );
}

#[test]
fn test_documentError_invalidEncoding_shouldDisplayPath() {
    let error = DocumentError::InvalidEncoding(PathBuf::from("latin1.json"));

    assert_eq!(error.to_string(), "Invalid UTF-8 encoding in latin1.json");
    assert_eq!(error.path(), &PathBuf::from("latin1.json"));
}
