/*!
 * End-to-end validation runs over temporary data trees
 */

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::Level;
use wordsik::app_config::Config;
use wordsik::content_filter::ContentFilter;
use wordsik::report::{self, OutputFormat};
use wordsik::validation::{
    ConsoleLogger, NullLogger, TranslationErrorKind, ValidationLogger, ValidationOptions, ValidationResult, ValidationService,
    ValidatorKind,
};

use crate::common;

/// Records every line it receives
#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl ValidationLogger for RecordingLogger {
    fn log(&self, level: Level, message: &str) -> Result<()> {
        self.lines.lock().unwrap().push((level, message.to_string()));
        Ok(())
    }
}

/// Flags any text mentioning zebras
struct ZebraFilter;

impl ContentFilter for ZebraFilter {
    fn is_flagged(&self, text: &str) -> bool {
        text.to_lowercase().contains("zebra")
    }
}

/// Fails on every call
struct BrokenLogger;

impl ValidationLogger for BrokenLogger {
    fn log(&self, _level: Level, _message: &str) -> Result<()> {
        Err(anyhow::anyhow!("log sink unavailable"))
    }
}

fn config_for(root: &std::path::Path) -> Config {
    Config {
        data_root: root.to_path_buf(),
        ..Config::default()
    }
}

fn service(root: &std::path::Path, changed: Vec<PathBuf>) -> ValidationService {
    ValidationService::new(config_for(root), Arc::new(NullLogger)).with_changed_files(Arc::new(changed))
}

#[tokio::test]
async fn test_run_withCleanTreeAndNoChanges_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;

    let result = service(temp_dir.path(), vec![]).run(&ValidationOptions::all()).await?;

    assert!(result.success, "unexpected errors: {:?}", result.errors);
    // syntax + content over both files; locale tree walk counts them once more
    assert_eq!(result.summary.total_files, 6);
    assert_eq!(result.summary.errors, 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withEmptyChangedFiles_shouldSkipTranslationsVacuously() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;

    let result = service(temp_dir.path(), vec![])
        .run(&ValidationOptions::only(&[ValidatorKind::Translation]))
        .await?;

    assert_eq!(result, ValidationResult::empty());
    assert_eq!(result.summary.total_files, 0);
    assert_eq!(result.summary.total_words, 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingTranslation_shouldFailAndReportComparison() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "en",
        1,
        1,
        &common::flat_unit(1, "Animals", vec![common::word("cat", "cat"), common::word("dog", "dog")]),
    )?;
    let es = common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "es",
        1,
        1,
        &common::flat_unit(1, "Animals", vec![common::word("cat", "gato")]),
    )?;

    let report = service(temp_dir.path(), vec![es.clone()])
        .run_report(&ValidationOptions::only(&[ValidatorKind::Translation]))
        .await?;

    assert!(!report.result.success);
    assert_eq!(report.result.errors.len(), 1);
    assert_eq!(report.result.errors[0].file.as_ref(), Some(&es));
    assert_eq!(report.comparisons.len(), 1);
    assert_eq!(report.comparisons[0].missing_words, vec!["dog".to_string()]);
    assert_eq!(
        report.comparisons[0].flattened_errors()[0].kind,
        TranslationErrorKind::MissingTranslation
    );
    Ok(())
}

#[tokio::test]
async fn test_run_withMalformedFile_shouldContinueWithOtherFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;
    let broken = common::create_test_file(temp_dir.path(), "vocabulary/fr/grade-1/week-1.json", "{ \"week\": ")?;

    let result = service(temp_dir.path(), vec![])
        .run(&ValidationOptions::only(&[ValidatorKind::Syntax]))
        .await?;

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].file.as_ref(), Some(&broken));
    assert_eq!(result.summary.total_files, 2);
    Ok(())
}

#[tokio::test]
async fn test_run_shouldConcatenateIssuesInInvocationOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "es",
        1,
        1,
        &common::flat_unit(1, "Animals", vec![common::word("cat", "gato 2")]),
    )?;
    common::create_test_file(temp_dir.path(), "vocabulary/es/grade-1/week-2.json", "[")?;

    let options = ValidationOptions::only(&[ValidatorKind::Locale, ValidatorKind::Syntax])
        .with_files(vec![temp_dir.path().join("vocabulary/es/grade-1/week-2.json"), path]);
    let result = service(temp_dir.path(), vec![]).run(&options).await?;

    // syntax runs first even though locale was listed first
    assert!(result.errors[0].message.contains("Invalid JSON"));
    assert_eq!(result.errors.len(), 2);
    assert!(result.warnings[0].message.contains("Non-es characters"));
    Ok(())
}

#[tokio::test]
async fn test_run_withBlockedWordInConfig_shouldFlagContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "en",
        1,
        1,
        &common::flat_unit(1, "Food", vec![common::word("broccoli", "broccoli")]),
    )?;
    let config = Config {
        blocked_words: vec!["broccoli".to_string()],
        ..config_for(temp_dir.path())
    };

    let result = ValidationService::new(config, Arc::new(NullLogger))
        .run(&ValidationOptions::only(&[ValidatorKind::Content]))
        .await?;

    assert!(!result.success);
    assert!(result.errors.iter().all(|e| e.message.starts_with("Disallowed content")));
    Ok(())
}

#[tokio::test]
async fn test_run_withInjectedFilter_shouldUseItForContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "en",
        1,
        1,
        &common::flat_unit(1, "Animals", vec![common::word("zebra", "zebra"), common::word("cat", "cat")]),
    )?;

    let result = service(temp_dir.path(), vec![])
        .with_filter(Arc::new(ZebraFilter))
        .run(&ValidationOptions::only(&[ValidatorKind::Content]))
        .await?;

    assert!(!result.success);
    assert!(!result.errors.is_empty());
    assert!(result.errors.iter().all(|e| e.message.contains("of word 0")));
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingDataRoot_shouldWarnOnlyThroughLocale() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().join("missing");

    let result = service(&root, vec![]).run(&ValidationOptions::all()).await?;

    assert!(result.success);
    assert_eq!(result.summary.total_files, 0);
    assert_eq!(result.warnings.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_run_withBrokenLogger_shouldNotChangeResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;
    let options = ValidationOptions::only(&[ValidatorKind::Syntax, ValidatorKind::Content, ValidatorKind::Locale]);

    let quiet = service(temp_dir.path(), vec![]).run(&options).await?;
    let broken = ValidationService::new(config_for(temp_dir.path()), Arc::new(BrokenLogger))
        .run(&options)
        .await?;

    assert_eq!(quiet, broken);
    Ok(())
}

#[tokio::test]
async fn test_run_withConsoleLogger_shouldMatchSilentRun() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;
    let options = ValidationOptions::only(&[ValidatorKind::Content, ValidatorKind::Locale]);

    let silent = service(temp_dir.path(), vec![]).run(&options).await?;
    let logged = ValidationService::new(config_for(temp_dir.path()), Arc::new(ConsoleLogger))
        .run(&options)
        .await?;

    assert_eq!(silent, logged);
    Ok(())
}

#[tokio::test]
async fn test_run_shouldForwardIssuesToInjectedLogger() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "vocabulary/en/grade-1/week-1.json", "nope")?;
    let logger = Arc::new(RecordingLogger::default());

    ValidationService::new(config_for(temp_dir.path()), logger.clone())
        .run(&ValidationOptions::only(&[ValidatorKind::Syntax]))
        .await?;

    let lines = logger.lines.lock().unwrap();
    assert!(lines.iter().any(|(level, line)| *level == Level::Error && line.contains("Invalid JSON")));
    Ok(())
}

#[tokio::test]
async fn test_status_shouldCountFilesPerGrade() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_clean_tree(temp_dir.path())?;
    common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "en",
        2,
        5,
        &common::flat_unit(5, "Food", vec![common::word("apple", "apple")]),
    )?;

    let status = service(temp_dir.path(), vec![]).status();

    let english = status
        .iter()
        .find(|s| s.language.code() == "en" && s.content_type.as_str() == "vocabulary")
        .unwrap();
    assert!(english.exists);
    assert_eq!(english.total_files(), 2);
    assert_eq!(english.grades[1].files, 1);
    assert!(status.iter().filter(|s| s.content_type.as_str() == "grammar").all(|s| !s.exists));

    let rendered = report::render_status(&status);
    assert!(rendered.contains("grammar:"));
    Ok(())
}

#[tokio::test]
async fn test_report_withJsonOutput_shouldBeParsable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (_, es) = common::create_clean_tree(temp_dir.path())?;

    let report = service(temp_dir.path(), vec![es]).run_report(&ValidationOptions::all()).await?;
    let json = report::render(&report, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["success"], true);
    assert_eq!(value["comparisons"][0]["language"], "es");
    assert!(value["summary"]["languages"].as_array().unwrap().len() >= 2);
    Ok(())
}
