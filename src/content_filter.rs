/*!
 * Disallowed-content detection.
 *
 * The content validator only needs a yes/no answer for a piece of text, so
 * the filter is a trait; `WordListFilter` is the stock implementation that
 * matches whole words, case-insensitively, against a block list.
 */

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::errors::ConfigError;

/// Words blocked out of the box. Extend through the `blocked_words` config entry.
pub const DEFAULT_BLOCKED_WORDS: &[&str] = &[
    "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "crap", "damn", "dick",
    "fuck", "fucking", "piss", "shit", "slut", "whore",
];

static DEFAULT_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| compile_pattern(DEFAULT_BLOCKED_WORDS, None).expect("valid default block list"));

/// Oracle answering "is this text flagged"
pub trait ContentFilter: Send + Sync {
    fn is_flagged(&self, text: &str) -> bool;
}

/// Whole-word, case-insensitive block list
#[derive(Debug, Clone)]
pub struct WordListFilter {
    pattern: Option<Regex>,
}

impl WordListFilter {
    /// Build a filter from a list of words; blank entries are ignored.
    ///
    /// Fails when the list is too large to compile into one matcher.
    pub fn new<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_size_limit(words, None)
    }

    /// Like `new`, with an explicit compiled-size limit in bytes
    pub fn with_size_limit<I, S>(words: I, size_limit: Option<usize>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = compile_pattern(words, size_limit)
            .map_err(|e| ConfigError::InvalidBlockedWords(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Default list plus extra configured words.
    pub fn with_extra_words(extra: &[String]) -> Result<Self, ConfigError> {
        if extra.iter().all(|w| w.trim().is_empty()) {
            return Ok(Self::default());
        }
        Self::new(
            DEFAULT_BLOCKED_WORDS
                .iter()
                .map(|w| w.to_string())
                .chain(extra.iter().cloned()),
        )
    }
}

fn compile_pattern<I, S>(words: I, size_limit: Option<usize>) -> Result<Option<Regex>, regex::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let alternatives: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_string())
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(&w))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    let mut builder = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")));
    builder.case_insensitive(true);
    if let Some(limit) = size_limit {
        builder.size_limit(limit);
    }
    builder.build().map(Some)
}

impl Default for WordListFilter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl ContentFilter for WordListFilter {
    fn is_flagged(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}
