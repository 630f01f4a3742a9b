/*!
 * Word-level diff between a base-language unit and a translated unit.
 *
 * Pure functions only: no IO and no issue emission. The translation
 * validator turns a `WordDiff` into issues and a `TranslationComparison`.
 */

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::document::WordEntry;
use crate::language_utils::SupportedLanguage;

use super::issues::IssueSeverity;

/// Kind of a per-word translation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationErrorKind {
    MissingTranslation,
    EmptyTranslation,
    /// Translation equals the base-language word
    #[serde(rename = "same_as_english")]
    SameAsSource,
    MissingDefinition,
    MissingExample,
}

impl TranslationErrorKind {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::SameAsSource => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }
}

/// One finding about one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationError {
    pub word: String,
    #[serde(rename = "type")]
    pub kind: TranslationErrorKind,
    pub message: String,
}

impl TranslationError {
    fn new(word: &str, kind: TranslationErrorKind, message: impl Into<String>) -> Self {
        Self {
            word: word.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Both units set a difficulty and they disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyMismatch {
    pub word: String,
    pub source: String,
    pub target: String,
}

/// Result of diffing two word lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDiff {
    /// In the source but not the target, source spelling, source order
    pub missing_words: Vec<String>,
    /// In the target but not the source, target spelling, target order
    pub extra_words: Vec<String>,
    /// Findings for words present in both
    pub translation_errors: Vec<TranslationError>,
    pub difficulty_mismatches: Vec<DifficultyMismatch>,
}

// Key -> entry, first occurrence wins, insertion order kept alongside.
struct KeyedWords<'a> {
    order: Vec<String>,
    entries: HashMap<String, &'a WordEntry>,
}

impl<'a> KeyedWords<'a> {
    fn index(words: &'a [WordEntry]) -> Self {
        let mut order = Vec::new();
        let mut entries = HashMap::new();
        for entry in words {
            let key = entry.key();
            if key.is_empty() || entries.contains_key(&key) {
                continue;
            }
            order.push(key.clone());
            entries.insert(key, entry);
        }
        Self { order, entries }
    }

    fn get(&self, key: &str) -> Option<&'a WordEntry> {
        self.entries.get(key).copied()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &'a WordEntry)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key.as_str(), *entry)))
    }
}

/// Diff a translated word list against its base-language counterpart
///
/// Words are matched on their trimmed, lower-cased spelling. Missing and
/// extra words are a plain set difference: duplicates within one list count
/// once, and the first occurrence is the one compared.
pub fn diff_words(source: &[WordEntry], target: &[WordEntry]) -> WordDiff {
    let source = KeyedWords::index(source);
    let target = KeyedWords::index(target);
    let mut diff = WordDiff::default();

    for (key, source_entry) in source.iter() {
        match target.get(key) {
            None => diff.missing_words.push(source_entry.word.trim().to_string()),
            Some(target_entry) => check_pair(source_entry, target_entry, &mut diff),
        }
    }

    for (key, target_entry) in target.iter() {
        if source.get(key).is_none() {
            diff.extra_words.push(target_entry.word.trim().to_string());
        }
    }

    diff
}

fn check_pair(source: &WordEntry, target: &WordEntry, diff: &mut WordDiff) {
    let word = source.word.trim();
    let translation = target.translation.trim();

    if translation.is_empty() {
        diff.translation_errors.push(TranslationError::new(
            word,
            TranslationErrorKind::EmptyTranslation,
            format!("Empty translation for word \"{}\"", word),
        ));
    } else if translation.to_lowercase() == word.to_lowercase() {
        diff.translation_errors.push(TranslationError::new(
            word,
            TranslationErrorKind::SameAsSource,
            format!("Translation same as source word for \"{}\"", word),
        ));
    }

    if target.definition.trim().is_empty() {
        diff.translation_errors.push(TranslationError::new(
            word,
            TranslationErrorKind::MissingDefinition,
            format!("Missing definition for word \"{}\"", word),
        ));
    }

    if target.example.trim().is_empty() {
        diff.translation_errors.push(TranslationError::new(
            word,
            TranslationErrorKind::MissingExample,
            format!("Missing example for word \"{}\"", word),
        ));
    }

    if let (Some(source_level), Some(target_level)) = (&source.difficulty, &target.difficulty) {
        // unsanctioned levels are compared as written
        let differs = match (source.difficulty_level(), target.difficulty_level()) {
            (Some(a), Some(b)) => a != b,
            _ => source_level.trim().to_lowercase() != target_level.trim().to_lowercase(),
        };
        if differs {
            diff.difficulty_mismatches.push(DifficultyMismatch {
                word: word.to_string(),
                source: source_level.clone(),
                target: target_level.clone(),
            });
        }
    }
}

/// Structured view of one source/target pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationComparison {
    pub source_file: PathBuf,
    pub target_file: PathBuf,
    pub language: SupportedLanguage,
    pub missing_words: Vec<String>,
    pub extra_words: Vec<String>,
    pub translation_errors: Vec<TranslationError>,
}

impl TranslationComparison {
    pub fn new(source_file: PathBuf, target_file: PathBuf, language: SupportedLanguage, diff: &WordDiff) -> Self {
        Self {
            source_file,
            target_file,
            language,
            missing_words: diff.missing_words.clone(),
            extra_words: diff.extra_words.clone(),
            translation_errors: diff.translation_errors.clone(),
        }
    }

    /// Missing words as `missing_translation` entries, then the per-word findings
    pub fn flattened_errors(&self) -> Vec<TranslationError> {
        self.missing_words
            .iter()
            .map(|word| {
                TranslationError::new(
                    word,
                    TranslationErrorKind::MissingTranslation,
                    format!("Missing translation for word \"{}\"", word),
                )
            })
            .chain(self.translation_errors.iter().cloned())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.missing_words.is_empty() && self.extra_words.is_empty() && self.translation_errors.is_empty()
    }
}
