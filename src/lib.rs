/*!
 * # wordsik - word-list content validation
 *
 * A Rust library for validating a multi-language tree of word-list units
 * (vocabulary, grammar and spelling content per language and grade level).
 *
 * ## Features
 *
 * - JSON well-formedness and UTF-8 checks
 * - Structural and quality checks of units and words
 * - Disallowed-content detection through a pluggable filter
 * - Per-language character-set checks and directory layout checks
 * - Translation consistency against a base language:
 *   - missing and extra words
 *   - empty or untranslated entries
 *   - missing annotations and difficulty mismatches
 * - Text, markdown and JSON reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Unit model and loading (flat and nested layouts)
 * - `content_filter`: Disallowed-content oracle
 * - `validation`: Validators, the word diff and the orchestrating service
 * - `report`: Report rendering
 * - `file_utils`: File system and git helpers
 * - `language_utils`: Languages, content types, grades and path helpers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod content_filter;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod report;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{VocabularyUnit, WordEntry};
pub use errors::{ConfigError, DocumentError};
pub use language_utils::{ContentType, SupportedLanguage, get_language_name};
pub use validation::{ValidationOptions, ValidationResult, ValidationService, ValidatorKind};
