/*!
 * Error types for the wordsik application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Validators never surface these to their callers: a `DocumentError` is
 * turned into a single validation issue at the point of use.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a word-list document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid UTF-8
    #[error("Invalid UTF-8 encoding in {}", .0.display())]
    InvalidEncoding(PathBuf),

    /// The file is not well-formed JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Path of the malformed file
        path: PathBuf,
        /// Parser diagnostic
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well-formed but does not have the unit shape
    #[error("Invalid document structure in {}: {message}", path.display())]
    Shape {
        /// Path of the offending file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },
}

impl DocumentError {
    /// Path of the file the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound(path) | Self::InvalidEncoding(path) => path,
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Shape { path, .. } => path,
        }
    }
}

/// Errors raised by configuration validation
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// No languages are configured
    #[error("At least one language must be configured")]
    NoLanguages,

    /// The base language is not in the configured language list
    #[error("Base language '{0}' is not in the configured languages")]
    BaseLanguageNotConfigured(String),

    /// The blocked-word list could not be compiled into a matcher
    #[error("Invalid blocked_words list: {0}")]
    InvalidBlockedWords(String),

    /// A length limit is zero or inconsistent with its counterpart
    #[error("Invalid length limit for {field}: {message}")]
    InvalidLimit {
        /// Name of the offending config field
        field: &'static str,
        /// Description of the problem
        message: String,
    },
}
