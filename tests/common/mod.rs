/*!
 * Common test utilities for the wordsik test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A word with all required fields filled in
pub fn word(word: &str, translation: &str) -> Value {
    json!({
        "word": word,
        "translation": translation,
        "definition": format!("A definition of {}", word),
        "example": format!("This sentence uses {}.", word),
        "difficulty": "easy"
    })
}

/// A flat unit document
pub fn flat_unit(week: u32, theme: &str, words: Vec<Value>) -> Value {
    json!({ "week": week.to_string(), "theme": theme, "words": words })
}

/// A nested unit document, as written by the content authoring tools
pub fn nested_unit(week: u32, theme: &str, language: &str, words: Vec<Value>) -> Value {
    json!({
        "metadata": { "week": week.to_string(), "theme": theme, "language": language, "version": "1.0" },
        "vocabulary": { "description": theme, "words": words },
        "activities": [],
        "assessment": { "questions": [] }
    })
}

/// Write a unit to `<root>/<content>/<language>/<grade>/week-<week>.json`
pub fn write_unit(root: &Path, content: &str, language: &str, grade: u8, week: u32, doc: &Value) -> Result<PathBuf> {
    let relative = format!("{}/{}/grade-{}/week-{}.json", content, language, grade, week);
    create_test_file(root, &relative, &serde_json::to_string_pretty(doc)?)
}

/// A small, clean data tree: English and Spanish animals, grade 1
pub fn create_clean_tree(root: &Path) -> Result<(PathBuf, PathBuf)> {
    let en = write_unit(
        root,
        "vocabulary",
        "en",
        1,
        1,
        &flat_unit(1, "Animals", vec![word("cat", "cat"), word("dog", "dog")]),
    )?;
    let es = write_unit(
        root,
        "vocabulary",
        "es",
        1,
        1,
        &nested_unit(1, "Animals", "es", vec![word("cat", "gato"), word("dog", "perro")]),
    )?;
    Ok((en, es))
}

/// Route `log` output through the test harness; safe to call more than once
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
