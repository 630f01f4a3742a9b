/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use wordsik::app_config::{Config, ContentConfig, LogLevel};
use wordsik::errors::ConfigError;
use wordsik::language_utils::SupportedLanguage;

use crate::common;

/// Test that the default configuration matches the documented defaults
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.data_root, std::path::PathBuf::from("data"));
    assert_eq!(config.base_language, SupportedLanguage::En);
    assert_eq!(config.languages, SupportedLanguage::ALL.to_vec());
    assert_eq!(config.git_base_branch, "main");
    assert!(!config.fail_on_warnings);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.content.min_word_length, 2);
    assert_eq!(config.content.min_definition_length, 10);
    assert_eq!(config.content.max_definition_length, 300);
    assert!(config.validate().is_ok());
}

/// Test that a missing file falls back to defaults
#[test]
fn test_load_withMissingFile_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let config = Config::load(temp_dir.path().join("wordsik.json"))?;

    assert_eq!(config.content, ContentConfig::default());
    Ok(())
}

/// Test that a partial file keeps defaults for everything it omits
#[test]
fn test_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "wordsik.json",
        r#"{ "languages": ["en", "ko"], "content": { "max_word_length": 30 }, "log_level": "debug" }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.languages, vec![SupportedLanguage::En, SupportedLanguage::Ko]);
    assert_eq!(config.content.max_word_length, 30);
    assert_eq!(config.content.min_word_length, 2);
    assert_eq!(config.content.short_word_exempt_themes, vec!["alphabet", "letters"]);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

#[test]
fn test_load_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "wordsik.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();

    assert!(format!("{:#}", error).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_load_withUnknownLanguage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "wordsik.json", r#"{ "languages": ["en", "de"] }"#)?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withBaseLanguageMissing_shouldFail() {
    let config = Config {
        languages: vec![SupportedLanguage::Es, SupportedLanguage::Fr],
        ..Config::default()
    };

    assert_eq!(
        config.validate(),
        Err(ConfigError::BaseLanguageNotConfigured("en".to_string()))
    );
}

#[test]
fn test_validate_withNoLanguages_shouldFail() {
    let config = Config {
        languages: vec![],
        ..Config::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::NoLanguages));
}

#[test]
fn test_validate_withInvertedLimits_shouldFail() {
    let mut config = Config::default();
    config.content.min_word_length = 60;

    let error = config.validate().unwrap_err();

    assert!(matches!(error, ConfigError::InvalidLimit { field: "min_word_length", .. }));
}

#[test]
fn test_validate_withZeroLimit_shouldFail() {
    let mut config = Config::default();
    config.content.max_definition_length = 0;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidLimit { field: "max_definition_length", .. })
    ));
}
