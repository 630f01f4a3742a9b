/*!
 * Per-language checks over the content tree.
 *
 * Translations must only use characters of their language (plus a small
 * punctuation set). Character problems, gaps in the
 * `contentType/language/grade` layout and themes present in a single
 * language are warnings: the corpus grows one language at a time.
 */

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::Level;

use crate::document::load_unit;
use crate::file_utils::FileManager;
use crate::language_utils::{ContentType, GradeLevel, SupportedLanguage, extract_language_from_path};

use super::issues::{IssueSink, ValidationIssue, ValidationResult};
use super::logger::ValidationLogger;
use super::validator::{Validator, ValidatorKind};

/// Character-set and layout validator
pub struct LocaleValidator {
    sink: IssueSink,
    data_root: PathBuf,
    languages: Vec<SupportedLanguage>,
}

impl LocaleValidator {
    pub fn new(
        logger: Arc<dyn ValidationLogger>,
        data_root: impl Into<PathBuf>,
        languages: Vec<SupportedLanguage>,
    ) -> Self {
        Self {
            sink: IssueSink::new(logger),
            data_root: data_root.into(),
            languages,
        }
    }

    /// Walk `<root>/<contentType>/<language>/<grade>` and check every unit found
    pub async fn validate_tree(&mut self) {
        self.sink.note(Level::Info, "Validating multi-language content...");

        for content_type in ContentType::ALL {
            let content_path = self.data_root.join(content_type.as_str());
            if !FileManager::dir_exists(&content_path) {
                self.warning(
                    &content_path,
                    format!("Content type directory not found: {}", content_path.display()),
                );
                continue;
            }

            let mut themes: BTreeMap<String, BTreeSet<SupportedLanguage>> = BTreeMap::new();
            for language in self.languages.clone() {
                self.validate_language_dir(&content_path, language, &mut themes).await;
            }
            self.check_theme_coverage(content_type, &themes);
        }
    }

    async fn validate_language_dir(
        &mut self,
        content_path: &Path,
        language: SupportedLanguage,
        themes: &mut BTreeMap<String, BTreeSet<SupportedLanguage>>,
    ) {
        let language_path = content_path.join(language.code());
        if !FileManager::dir_exists(&language_path) {
            self.warning(
                &language_path,
                format!("Language directory not found: {}", language_path.display()),
            );
            return;
        }

        for grade in GradeLevel::all() {
            let grade_path = language_path.join(grade.dir_name());
            if !FileManager::dir_exists(&grade_path) {
                self.warning(
                    &grade_path,
                    format!("Grade directory not found: {}", grade_path.display()),
                );
                continue;
            }

            let files = FileManager::json_files_in_dir(&grade_path);
            if files.is_empty() {
                self.warning(&grade_path, format!("No JSON files found in {}", grade_path.display()));
                continue;
            }

            for file in files {
                if let Some(theme) = self.validate_unit_file(&file, language).await {
                    themes.entry(theme).or_default().insert(language);
                }
            }
        }
    }

    /// Check one file's translations; returns the unit theme when it could be read
    async fn validate_unit_file(&mut self, path: &Path, language: SupportedLanguage) -> Option<String> {
        let unit = match load_unit(path).await {
            Ok(unit) => unit,
            Err(e) => {
                self.sink.add(ValidationIssue::error(e.to_string()).in_file(path));
                return None;
            }
        };

        self.sink.record_file(path, unit.words().len());

        for (index, word) in unit.words().iter().enumerate() {
            let translation = word.translation.trim();
            if translation.is_empty() {
                self.warning(
                    path,
                    format!("Missing translation in {} word {}", path.display(), index),
                );
                continue;
            }

            if !language.allows_text(translation) {
                self.sink.add(
                    ValidationIssue::warning(format!(
                        "Non-{} characters in translation \"{}\" in {} word {}",
                        language.code(),
                        translation,
                        path.display(),
                        index
                    ))
                    .in_file(path)
                    .with_context(translation.to_string()),
                );
            }
        }

        unit.theme.filter(|t| !t.trim().is_empty())
    }

    fn check_theme_coverage(
        &mut self,
        content_type: ContentType,
        themes: &BTreeMap<String, BTreeSet<SupportedLanguage>>,
    ) {
        if self.languages.len() < 2 {
            return;
        }

        for (theme, languages) in themes {
            if languages.len() == 1 {
                if let Some(language) = languages.iter().next() {
                    self.sink.add(ValidationIssue::warning(format!(
                        "Theme \"{}\" in {} only found in {} - consider adding it to other languages",
                        theme, content_type, language
                    )));
                }
            } else {
                self.sink.note(
                    Level::Debug,
                    &format!(
                        "Theme \"{}\" found in: {}",
                        theme,
                        languages.iter().map(|l| l.code()).collect::<Vec<_>>().join(", ")
                    ),
                );
            }
        }
    }

    fn warning(&mut self, path: &Path, message: String) {
        self.sink.add(ValidationIssue::warning(message).in_file(path));
    }
}

#[async_trait]
impl Validator for LocaleValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Locale
    }

    async fn validate_file(&mut self, path: &Path) {
        match extract_language_from_path(path) {
            Some(language) => {
                self.validate_unit_file(path, language).await;
            }
            None => self.warning(
                path,
                format!("Could not determine language from file path: {}", path.display()),
            ),
        }
    }

    fn result(&self) -> ValidationResult {
        self.sink.result()
    }

    fn clear(&mut self) {
        self.sink.clear();
    }
}
