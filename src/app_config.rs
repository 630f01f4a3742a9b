use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::content_filter::WordListFilter;
use crate::errors::ConfigError;
use crate::language_utils::SupportedLanguage;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and defaulting configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root of the content tree (`<root>/<contentType>/<language>/<grade>`)
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Language every other language is compared against
    #[serde(default = "default_base_language")]
    pub base_language: SupportedLanguage,

    /// Languages expected in the content tree
    #[serde(default = "default_languages")]
    pub languages: Vec<SupportedLanguage>,

    /// Content quality thresholds
    #[serde(default)]
    pub content: ContentConfig,

    /// Extra words for the disallowed-content filter
    #[serde(default)]
    pub blocked_words: Vec<String>,

    /// Branch that changed files are computed against
    #[serde(default = "default_git_base_branch")]
    pub git_base_branch: String,

    /// Treat warnings as failures for the exit code
    #[serde(default)]
    pub fail_on_warnings: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Content quality thresholds
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentConfig {
    // @field: Words shorter than this are flagged
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    // @field: Definitions shorter than this are flagged
    #[serde(default = "default_min_text_length")]
    pub min_definition_length: usize,

    // @field: Examples shorter than this are flagged
    #[serde(default = "default_min_text_length")]
    pub min_example_length: usize,

    // @field: Words longer than this are flagged
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,

    // @field: Definitions longer than this are flagged
    #[serde(default = "default_max_definition_length")]
    pub max_definition_length: usize,

    // @field: Units whose theme or file name contains one of these skip the short-word check
    #[serde(default = "default_short_word_exempt_themes")]
    pub short_word_exempt_themes: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            min_word_length: default_min_word_length(),
            min_definition_length: default_min_text_length(),
            min_example_length: default_min_text_length(),
            max_word_length: default_max_word_length(),
            max_definition_length: default_max_definition_length(),
            short_word_exempt_themes: default_short_word_exempt_themes(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_base_language() -> SupportedLanguage {
    SupportedLanguage::En
}

fn default_languages() -> Vec<SupportedLanguage> {
    SupportedLanguage::ALL.to_vec()
}

fn default_git_base_branch() -> String {
    "main".to_string()
}

fn default_min_word_length() -> usize {
    2
}

fn default_min_text_length() -> usize {
    10
}

fn default_max_word_length() -> usize {
    50
}

fn default_max_definition_length() -> usize {
    300
}

fn default_short_word_exempt_themes() -> Vec<String> {
    vec!["alphabet".to_string(), "letters".to_string()]
}

impl Config {
    /// Load the configuration from a JSON file
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Config file not found at {:?}, using defaults.", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }

        if !self.languages.contains(&self.base_language) {
            return Err(ConfigError::BaseLanguageNotConfigured(
                self.base_language.code().to_string(),
            ));
        }

        let content = &self.content;
        let limits = [
            ("min_word_length", content.min_word_length),
            ("max_word_length", content.max_word_length),
            ("max_definition_length", content.max_definition_length),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidLimit {
                    field,
                    message: "must be greater than zero".to_string(),
                });
            }
        }

        if content.min_word_length > content.max_word_length {
            return Err(ConfigError::InvalidLimit {
                field: "min_word_length",
                message: format!(
                    "{} exceeds max_word_length {}",
                    content.min_word_length, content.max_word_length
                ),
            });
        }

        if content.min_definition_length > content.max_definition_length {
            return Err(ConfigError::InvalidLimit {
                field: "min_definition_length",
                message: format!(
                    "{} exceeds max_definition_length {}",
                    content.min_definition_length, content.max_definition_length
                ),
            });
        }

        WordListFilter::with_extra_words(&self.blocked_words)?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            data_root: default_data_root(),
            base_language: default_base_language(),
            languages: default_languages(),
            content: ContentConfig::default(),
            blocked_words: Vec::new(),
            git_base_branch: default_git_base_branch(),
            fail_on_warnings: false,
            log_level: LogLevel::default(),
        }
    }
}
