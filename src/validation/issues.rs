/*!
 * Issues, results and the per-validator issue accumulator.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::Level;
use serde::Serialize;

use crate::language_utils::{SupportedLanguage, extract_language_from_path};

use super::logger::ValidationLogger;

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Warning - reported, never fails the run
    Warning,
    /// Error - makes the owning result unsuccessful
    Error,
}

/// A validation issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ValidationIssue {
    /// Create an error issue
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Error, message.into())
    }

    /// Create a warning issue
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Warning, message.into())
    }

    fn new(severity: IssueSeverity, message: String) -> Self {
        Self {
            severity,
            message,
            file: None,
            line: None,
            column: None,
            context: None,
        }
    }

    /// Tag the issue with the file it was found in
    pub fn in_file(mut self, file: &Path) -> Self {
        self.file = Some(file.to_path_buf());
        self
    }

    /// Attach a source position
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Attach free-form context, e.g. the offending word
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (line {}, column {})", line, column)?;
        }
        if let Some(context) = &self.context {
            write!(f, " [{}]", context)?;
        }
        Ok(())
    }
}

/// Per-language counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub language: SupportedLanguage,
    pub files: usize,
    pub words: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl LanguageSummary {
    fn empty(language: SupportedLanguage) -> Self {
        Self {
            language,
            files: 0,
            words: 0,
            errors: 0,
            warnings: 0,
        }
    }
}

/// Aggregate counters of a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_files: usize,
    pub total_words: usize,
    pub errors: usize,
    pub warnings: usize,
    pub languages: Vec<LanguageSummary>,
}

impl Summary {
    /// Add another summary's counters into this one, merging languages by code
    pub fn absorb(&mut self, other: &Summary) {
        self.total_files += other.total_files;
        self.total_words += other.total_words;
        self.errors += other.errors;
        self.warnings += other.warnings;

        for incoming in &other.languages {
            match self.languages.iter_mut().find(|l| l.language == incoming.language) {
                Some(existing) => {
                    existing.files += incoming.files;
                    existing.words += incoming.words;
                    existing.errors += incoming.errors;
                    existing.warnings += incoming.warnings;
                }
                None => self.languages.push(incoming.clone()),
            }
        }
        self.languages.sort_by_key(|l| l.language);
    }
}

/// Outcome of one or more validators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub success: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub summary: Summary,
}

impl ValidationResult {
    /// A successful result with nothing checked
    pub fn empty() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Merge results in order: success is AND-ed, issues are concatenated, counters summed
    pub fn merge<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        results.into_iter().fold(Self::empty(), |mut merged, result| {
            merged.success = merged.success && result.success;
            merged.summary.absorb(&result.summary);
            merged.errors.extend(result.errors);
            merged.warnings.extend(result.warnings);
            merged
        })
    }

    /// Whether a run with this result should exit non-zero
    pub fn should_fail(&self, fail_on_warnings: bool) -> bool {
        !self.success || (fail_on_warnings && !self.warnings.is_empty())
    }
}

/// Accumulates the issues and counters of one validator
///
/// Every issue is also forwarded to the injected logger; a logger failure is
/// dropped and never changes what was accumulated.
pub struct IssueSink {
    logger: Arc<dyn ValidationLogger>,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    total_files: usize,
    total_words: usize,
    languages: BTreeMap<SupportedLanguage, LanguageSummary>,
}

impl IssueSink {
    pub fn new(logger: Arc<dyn ValidationLogger>) -> Self {
        Self {
            logger,
            errors: Vec::new(),
            warnings: Vec::new(),
            total_files: 0,
            total_words: 0,
            languages: BTreeMap::new(),
        }
    }

    /// Record an issue
    pub fn add(&mut self, issue: ValidationIssue) {
        let language = issue.file.as_deref().and_then(extract_language_from_path);

        match issue.severity {
            IssueSeverity::Error => {
                self.emit(Level::Error, &issue.to_string());
                if let Some(language) = language {
                    self.language_entry(language).errors += 1;
                }
                self.errors.push(issue);
            }
            IssueSeverity::Warning => {
                self.emit(Level::Warn, &issue.to_string());
                if let Some(language) = language {
                    self.language_entry(language).warnings += 1;
                }
                self.warnings.push(issue);
            }
        }
    }

    /// Count a checked file and its words
    pub fn record_file(&mut self, path: &Path, words: usize) {
        self.total_files += 1;
        self.total_words += words;

        if let Some(language) = extract_language_from_path(path) {
            let entry = self.language_entry(language);
            entry.files += 1;
            entry.words += words;
        }
    }

    /// Send a progress message to the logger
    pub fn note(&self, level: Level, message: &str) {
        self.emit(level, message);
    }

    /// Snapshot of everything accumulated so far
    pub fn result(&self) -> ValidationResult {
        ValidationResult {
            success: self.errors.is_empty(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            summary: Summary {
                total_files: self.total_files,
                total_words: self.total_words,
                errors: self.errors.len(),
                warnings: self.warnings.len(),
                languages: self.languages.values().cloned().collect(),
            },
        }
    }

    /// Drop all issues and counters
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
        self.total_files = 0;
        self.total_words = 0;
        self.languages.clear();
    }

    fn language_entry(&mut self, language: SupportedLanguage) -> &mut LanguageSummary {
        self.languages
            .entry(language)
            .or_insert_with(|| LanguageSummary::empty(language))
    }

    fn emit(&self, level: Level, message: &str) {
        let _ = self.logger.log(level, message);
    }
}
