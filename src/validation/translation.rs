/*!
 * Translation consistency validation.
 *
 * Every translated unit is paired with the base-language unit at the same
 * `contentType/grade/week` position (the language segment of the path is
 * swapped) and diffed word by word. Findings become issues as they are
 * produced and are also kept as one `TranslationComparison` per pair.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::Level;

use crate::document::{VocabularyUnit, load_unit};
use crate::errors::DocumentError;
use crate::file_utils::FileManager;
use crate::language_utils::{SupportedLanguage, extract_language_from_path, replace_language_segment};

use super::diff::{TranslationComparison, diff_words};
use super::issues::{IssueSeverity, IssueSink, ValidationIssue, ValidationResult};
use super::logger::ValidationLogger;
use super::validator::{Validator, ValidatorKind};

/// Compares translated units against the base language
pub struct TranslationValidator {
    sink: IssueSink,
    base_language: SupportedLanguage,
    languages: Vec<SupportedLanguage>,
    comparisons: Vec<TranslationComparison>,
}

impl TranslationValidator {
    pub fn new(
        logger: Arc<dyn ValidationLogger>,
        base_language: SupportedLanguage,
        languages: Vec<SupportedLanguage>,
    ) -> Self {
        Self {
            sink: IssueSink::new(logger),
            base_language,
            languages,
            comparisons: Vec::new(),
        }
    }

    /// Validate the translated files among `changed_files`
    ///
    /// Files are grouped by language; deleted files, base-language files and
    /// files of languages outside the configured set are skipped. Returns the
    /// comparisons produced by this call.
    pub async fn validate_changes(&mut self, changed_files: &[PathBuf]) -> Vec<TranslationComparison> {
        if changed_files.is_empty() {
            self.sink.note(Level::Info, "No changed files to validate");
            return Vec::new();
        }

        let mut by_language: BTreeMap<SupportedLanguage, Vec<&PathBuf>> = BTreeMap::new();
        for file in changed_files {
            if !FileManager::file_exists(file) {
                self.sink.note(
                    Level::Debug,
                    &format!("Skipping {}: deleted on this branch", file.display()),
                );
                continue;
            }
            match extract_language_from_path(file) {
                Some(language) if language == self.base_language => {}
                Some(language) if self.languages.contains(&language) => {
                    by_language.entry(language).or_default().push(file);
                }
                _ => self.sink.note(
                    Level::Debug,
                    &format!("Skipping {}: not a translated unit", file.display()),
                ),
            }
        }

        let first_new = self.comparisons.len();
        for (language, files) in by_language {
            self.sink.note(
                Level::Info,
                &format!("Validating {} translations ({} files)", language.name(), files.len()),
            );
            for file in files {
                self.validate_target(file, language).await;
            }
        }

        self.comparisons[first_new..].to_vec()
    }

    /// Comparisons accumulated since the last `clear`
    pub fn comparisons(&self) -> &[TranslationComparison] {
        &self.comparisons
    }

    /// The base-language file paired with `target`, if it exists
    pub fn find_source_file(&self, target: &Path) -> Option<PathBuf> {
        replace_language_segment(target, self.base_language).filter(|p| FileManager::file_exists(p))
    }

    async fn validate_target(&mut self, target: &Path, language: SupportedLanguage) {
        let Some(source) = self.find_source_file(target) else {
            self.sink.add(
                ValidationIssue::warning(format!(
                    "No corresponding source file found for {}",
                    target.display()
                ))
                .in_file(target),
            );
            return;
        };

        match Self::load_pair(&source, target).await {
            Ok((source_unit, target_unit)) => {
                self.sink.record_file(target, target_unit.words().len());
                let comparison = self.compare_units(&source, target, language, &source_unit, &target_unit);
                self.comparisons.push(comparison);
            }
            Err(e) => self.sink.add(
                ValidationIssue::error(format!(
                    "Error comparing translations in {}: {}",
                    target.display(),
                    e
                ))
                .in_file(target),
            ),
        }
    }

    async fn load_pair(source: &Path, target: &Path) -> Result<(VocabularyUnit, VocabularyUnit), DocumentError> {
        let source_unit = load_unit(source).await?;
        let target_unit = load_unit(target).await?;
        Ok((source_unit, target_unit))
    }

    /// Diff two loaded units and raise the matching issues against `target`
    pub fn compare_units(
        &mut self,
        source: &Path,
        target: &Path,
        language: SupportedLanguage,
        source_unit: &VocabularyUnit,
        target_unit: &VocabularyUnit,
    ) -> TranslationComparison {
        let diff = diff_words(source_unit.words(), target_unit.words());
        let base_name = self.base_language.name();

        for word in &diff.missing_words {
            self.sink.add(
                ValidationIssue::error(format!(
                    "Missing translation for word \"{}\" in {}",
                    word,
                    target.display()
                ))
                .in_file(target)
                .with_context(word.clone()),
            );
        }

        for word in &diff.extra_words {
            self.sink.add(
                ValidationIssue::warning(format!(
                    "Extra word \"{}\" in {} not found in {} version",
                    word,
                    target.display(),
                    base_name
                ))
                .in_file(target)
                .with_context(word.clone()),
            );
        }

        for error in &diff.translation_errors {
            let message = format!("{} in {}", error.message, target.display());
            let issue = match error.kind.severity() {
                IssueSeverity::Error => ValidationIssue::error(message),
                IssueSeverity::Warning => ValidationIssue::warning(message),
            };
            self.sink.add(issue.in_file(target).with_context(error.word.clone()));
        }

        for mismatch in &diff.difficulty_mismatches {
            self.sink.add(
                ValidationIssue::warning(format!(
                    "Difficulty level mismatch for word \"{}\" in {}: {} vs {}",
                    mismatch.word,
                    target.display(),
                    mismatch.source,
                    mismatch.target
                ))
                .in_file(target)
                .with_context(mismatch.word.clone()),
            );
        }

        TranslationComparison::new(source.to_path_buf(), target.to_path_buf(), language, &diff)
    }
}

#[async_trait]
impl Validator for TranslationValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Translation
    }

    async fn validate_file(&mut self, path: &Path) {
        match extract_language_from_path(path) {
            Some(language) if language != self.base_language => {
                self.validate_target(path, language).await;
            }
            Some(_) => {}
            None => self.sink.add(
                ValidationIssue::warning(format!(
                    "Could not determine language from file path: {}",
                    path.display()
                ))
                .in_file(path),
            ),
        }
    }

    fn result(&self) -> ValidationResult {
        self.sink.result()
    }

    fn clear(&mut self) {
        self.sink.clear();
        self.comparisons.clear();
    }
}
