/*!
 * Validation module for word-list units.
 *
 * Four validators share one contract and report into their own issue sink:
 * - Syntax: well-formed, UTF-8 JSON
 * - Content: required fields, length heuristics, disallowed content
 * - Locale: per-language character sets and directory layout
 * - Translation: word-level consistency against the base language
 *
 * # Architecture
 *
 * - `issues`: issues, results and the accumulating `IssueSink`
 * - `logger`: the logging collaborator injected into every validator
 * - `validator`: the `Validator` trait
 * - `diff`: the pure word diff behind translation validation
 * - `service`: selects, runs and merges validators
 */

pub mod content;
pub mod diff;
pub mod issues;
pub mod locale;
pub mod logger;
pub mod service;
pub mod syntax;
pub mod translation;
pub mod validator;

// Re-export main types
pub use content::{ContentRules, ContentValidator};
pub use diff::{TranslationComparison, TranslationError, TranslationErrorKind, WordDiff, diff_words};
pub use issues::{IssueSeverity, LanguageSummary, Summary, ValidationIssue, ValidationResult};
pub use locale::LocaleValidator;
pub use logger::{ConsoleLogger, FileLogger, NullLogger, TeeLogger, ValidationLogger};
pub use service::{ChangedFilesSource, DirectoryStatus, GitChangedFiles, ValidationOptions, ValidationReport, ValidationService};
pub use syntax::SyntaxValidator;
pub use translation::TranslationValidator;
pub use validator::{Validator, ValidatorKind};
