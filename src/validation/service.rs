/*!
 * Validation service that orchestrates all validators.
 *
 * Runs the selected validator kinds one after the other over a resolved file
 * list and merges their results in invocation order. Translation validation
 * works on the changed files instead of the whole tree; when nothing changed
 * it is skipped and counts as a successful, empty result.
 */

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;

use crate::app_config::Config;
use crate::content_filter::{ContentFilter, WordListFilter};
use crate::file_utils::FileManager;
use crate::language_utils::{ContentType, GradeLevel, SupportedLanguage};

use super::content::ContentValidator;
use super::diff::TranslationComparison;
use super::issues::ValidationResult;
use super::locale::LocaleValidator;
use super::logger::ValidationLogger;
use super::syntax::SyntaxValidator;
use super::translation::TranslationValidator;
use super::validator::{Validator, ValidatorKind};

/// What a run should check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Validator kinds to run; empty means all of them
    pub kinds: Vec<ValidatorKind>,
    /// Explicit files; empty means the whole data tree (or the changed files)
    pub files: Vec<PathBuf>,
}

impl ValidationOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(kinds: &[ValidatorKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    /// Kinds to run, in the fixed invocation order, without repeats
    pub fn selected_kinds(&self) -> Vec<ValidatorKind> {
        ValidatorKind::ALL
            .into_iter()
            .filter(|kind| self.kinds.is_empty() || self.kinds.contains(kind))
            .collect()
    }
}

/// Where translation validation gets its changed files from
pub trait ChangedFilesSource: Send + Sync {
    fn changed_files(&self) -> Vec<PathBuf>;
}

/// Changed JSON files according to git, relative to a base branch
#[derive(Debug, Clone)]
pub struct GitChangedFiles {
    pub base_branch: String,
}

impl ChangedFilesSource for GitChangedFiles {
    fn changed_files(&self) -> Vec<PathBuf> {
        FileManager::changed_json_files_or_empty(&self.base_branch)
    }
}

/// A fixed list, mostly for tests and scripted runs
impl ChangedFilesSource for Vec<PathBuf> {
    fn changed_files(&self) -> Vec<PathBuf> {
        self.clone()
    }
}

/// Merged result of a run plus the translation comparisons behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub comparisons: Vec<TranslationComparison>,
}

/// File counts of one `contentType/language` directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStatus {
    pub content_type: ContentType,
    pub language: SupportedLanguage,
    pub exists: bool,
    pub grades: Vec<GradeStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeStatus {
    pub grade: u8,
    pub files: usize,
}

impl DirectoryStatus {
    pub fn total_files(&self) -> usize {
        self.grades.iter().map(|g| g.files).sum()
    }
}

/// Runs validators over the content tree
pub struct ValidationService {
    config: Config,
    logger: Arc<dyn ValidationLogger>,
    filter: Arc<dyn ContentFilter>,
    changed_files: Arc<dyn ChangedFilesSource>,
}

impl ValidationService {
    /// Create a service with the configured filter and git as the change source
    pub fn new(config: Config, logger: Arc<dyn ValidationLogger>) -> Self {
        let filter = match WordListFilter::with_extra_words(&config.blocked_words) {
            Ok(filter) => filter,
            Err(e) => {
                warn!("{}; falling back to the default blocked-word list", e);
                WordListFilter::default()
            }
        };
        let filter = Arc::new(filter);
        let changed_files = Arc::new(GitChangedFiles {
            base_branch: config.git_base_branch.clone(),
        });

        Self {
            config,
            logger,
            filter,
            changed_files,
        }
    }

    pub fn with_filter(mut self, filter: Arc<dyn ContentFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_changed_files(mut self, source: Arc<dyn ChangedFilesSource>) -> Self {
        self.changed_files = source;
        self
    }

    /// Run the selected validators and merge their results
    pub async fn run(&self, options: &ValidationOptions) -> Result<ValidationResult> {
        Ok(self.run_report(options).await?.result)
    }

    /// Like `run`, also returning the translation comparisons
    pub async fn run_report(&self, options: &ValidationOptions) -> Result<ValidationReport> {
        let kinds = options.selected_kinds();
        let needs_tree = kinds
            .iter()
            .any(|k| matches!(k, ValidatorKind::Syntax | ValidatorKind::Content));

        let files = if !options.files.is_empty() {
            options.files.clone()
        } else if needs_tree {
            self.tree_files()?
        } else {
            Vec::new()
        };

        let mut results = Vec::with_capacity(kinds.len());
        let mut comparisons = Vec::new();
        for kind in kinds {
            info!("Running {} validation...", kind.name());
            let result = match kind {
                ValidatorKind::Translation => {
                    let (result, found) = self.run_translation(options).await;
                    comparisons = found;
                    result
                }
                _ => self.run_kind(kind, options, &files).await,
            };
            debug!(
                "{} validation: {} errors, {} warnings",
                kind.name(),
                result.errors.len(),
                result.warnings.len()
            );
            results.push(result);
        }

        Ok(ValidationReport {
            result: ValidationResult::merge(results),
            comparisons,
        })
    }

    async fn run_translation(&self, options: &ValidationOptions) -> (ValidationResult, Vec<TranslationComparison>) {
        let changed = if options.files.is_empty() {
            self.changed_files.changed_files()
        } else {
            options.files.clone()
        };

        if changed.is_empty() {
            info!("No changed files, skipping translation validation");
            return (ValidationResult::empty(), Vec::new());
        }

        let mut validator = TranslationValidator::new(
            self.logger.clone(),
            self.config.base_language,
            self.config.languages.clone(),
        );
        let comparisons = validator.validate_changes(&changed).await;
        (validator.result(), comparisons)
    }

    async fn run_kind(&self, kind: ValidatorKind, options: &ValidationOptions, files: &[PathBuf]) -> ValidationResult {
        match kind {
            ValidatorKind::Locale if options.files.is_empty() => {
                let mut validator = LocaleValidator::new(
                    self.logger.clone(),
                    &self.config.data_root,
                    self.config.languages.clone(),
                );
                validator.validate_tree().await;
                validator.result()
            }
            _ => {
                let mut validator = self.build(kind);
                validator.validate_files(files).await;
                validator.result()
            }
        }
    }

    /// Construct a fresh validator of the given kind
    pub fn build(&self, kind: ValidatorKind) -> Box<dyn Validator> {
        let logger = self.logger.clone();
        match kind {
            ValidatorKind::Syntax => Box::new(SyntaxValidator::new(logger)),
            ValidatorKind::Content => Box::new(ContentValidator::with_rules(
                logger,
                self.filter.clone(),
                self.config.content.clone().into(),
            )),
            ValidatorKind::Translation => Box::new(TranslationValidator::new(
                logger,
                self.config.base_language,
                self.config.languages.clone(),
            )),
            ValidatorKind::Locale => Box::new(LocaleValidator::new(
                logger,
                &self.config.data_root,
                self.config.languages.clone(),
            )),
        }
    }

    fn tree_files(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.data_root;
        if !FileManager::dir_exists(root) {
            warn!("Data directory not found: {:?}", root);
            return Ok(Vec::new());
        }
        FileManager::find_json_files(root)
    }

    /// File counts per content type, language and grade
    pub fn status(&self) -> Vec<DirectoryStatus> {
        let mut status = Vec::new();
        for content_type in ContentType::ALL {
            for &language in &self.config.languages {
                let language_path = self
                    .config
                    .data_root
                    .join(content_type.as_str())
                    .join(language.code());
                let exists = FileManager::dir_exists(&language_path);
                let grades = if exists {
                    GradeLevel::all()
                        .map(|grade| GradeStatus {
                            grade: grade.level(),
                            files: FileManager::json_files_in_dir(language_path.join(grade.dir_name())).len(),
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                status.push(DirectoryStatus {
                    content_type,
                    language,
                    exists,
                    grades,
                });
            }
        }
        status
    }
}
