/*!
 * Content validation for unit files.
 *
 * This module checks what a unit says rather than how it is encoded:
 * - Required unit fields (`week`, `theme`, word or rule list)
 * - Required word fields and sanctioned difficulty levels
 * - Length heuristics for words, definitions and examples
 * - Disallowed content in any text field
 * - Duplicate words within one unit
 * - Capitalization of English words
 *
 * Grammar and spelling units only need a rule or word list; the four-field
 * word schema applies to vocabulary units.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::Level;

use crate::app_config::ContentConfig;
use crate::content_filter::ContentFilter;
use crate::document::{REQUIRED_WORD_FIELDS, VocabularyUnit, WordEntry, load_unit};
use crate::language_utils::{ContentType, SupportedLanguage, extract_content_type_from_path, extract_language_from_path};

use super::issues::{IssueSink, ValidationIssue, ValidationResult};
use super::logger::ValidationLogger;
use super::validator::{Validator, ValidatorKind};

/// Thresholds for the length heuristics
#[derive(Debug, Clone)]
pub struct ContentRules {
    pub min_word_length: usize,
    pub min_definition_length: usize,
    pub min_example_length: usize,
    pub max_word_length: usize,
    pub max_definition_length: usize,
    /// Lower-cased markers of units allowed to hold one-letter words
    pub short_word_exempt_themes: Vec<String>,
}

impl Default for ContentRules {
    fn default() -> Self {
        ContentConfig::default().into()
    }
}

impl From<ContentConfig> for ContentRules {
    fn from(config: ContentConfig) -> Self {
        Self {
            min_word_length: config.min_word_length,
            min_definition_length: config.min_definition_length,
            min_example_length: config.min_example_length,
            max_word_length: config.max_word_length,
            max_definition_length: config.max_definition_length,
            short_word_exempt_themes: config
                .short_word_exempt_themes
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }
}

/// Structural and quality checks for unit content
pub struct ContentValidator {
    sink: IssueSink,
    rules: ContentRules,
    filter: Arc<dyn ContentFilter>,
}

impl ContentValidator {
    pub fn with_rules(
        logger: Arc<dyn ValidationLogger>,
        filter: Arc<dyn ContentFilter>,
        rules: ContentRules,
    ) -> Self {
        Self {
            sink: IssueSink::new(logger),
            rules,
            filter,
        }
    }

    /// Check an already-loaded unit
    ///
    /// `content_type` decides which schema applies.
    pub fn validate_unit(&mut self, unit: &VocabularyUnit, path: &Path, content_type: ContentType) {
        self.sink.record_file(path, unit.words().len());
        let file = path.display().to_string();

        for (field, value) in [("week", &unit.week), ("theme", &unit.theme)] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                self.error(path, format!("Missing required field '{}' in {}", field, file));
            }
        }

        if content_type.is_rule_based() {
            if !unit.has_rule_list() && !unit.has_word_list() {
                self.error(
                    path,
                    format!("Missing 'rules' or 'words' list in {} unit {}", content_type, file),
                );
            }
            for (index, word) in unit.words().iter().enumerate() {
                self.check_disallowed(word, index, path);
            }
            return;
        }

        if !unit.has_word_list() {
            self.error(path, format!("Missing required field 'words' in {}", file));
            return;
        }

        let exempt = self.is_short_word_exempt(unit, path);
        let english = extract_language_from_path(path) == Some(SupportedLanguage::En);
        for (index, word) in unit.words().iter().enumerate() {
            self.check_required_fields(word, index, path);
            self.check_difficulty(word, index, path);
            self.check_lengths(word, index, path, exempt);
            self.check_disallowed(word, index, path);
            if english {
                self.check_capitalization(word, path);
            }
        }

        self.check_duplicates(unit.words(), path);
    }

    fn check_required_fields(&mut self, word: &WordEntry, index: usize, path: &Path) {
        let values = [&word.word, &word.translation, &word.definition, &word.example];
        for (field, value) in REQUIRED_WORD_FIELDS.into_iter().zip(values) {
            if word.mistyped_fields.contains(&field) {
                self.error(
                    path,
                    format!(
                        "Field '{}' must be a string in word {} of {}",
                        field,
                        index,
                        path.display()
                    ),
                );
            } else if value.trim().is_empty() {
                self.error(
                    path,
                    format!(
                        "Missing required field '{}' in word {} of {}",
                        field,
                        index,
                        path.display()
                    ),
                );
            }
        }
    }

    fn check_difficulty(&mut self, word: &WordEntry, index: usize, path: &Path) {
        if let Some(difficulty) = &word.difficulty {
            if word.difficulty_level().is_none() {
                self.warning(
                    path,
                    format!(
                        "Invalid difficulty level '{}' in word {} of {}",
                        difficulty,
                        index,
                        path.display()
                    ),
                );
            }
        }
    }

    fn check_lengths(&mut self, word: &WordEntry, index: usize, path: &Path, short_word_exempt: bool) {
        let word_len = char_len(&word.word);
        let definition_len = char_len(&word.definition);
        let example_len = char_len(&word.example);
        let file = path.display();

        if word_len > 0 && word_len < self.rules.min_word_length && !short_word_exempt {
            self.warning(path, format!("Very short word in {} word {}: \"{}\"", file, index, word.word));
        }
        if word_len > self.rules.max_word_length {
            self.warning(path, format!("Very long word in {} word {}: \"{}\"", file, index, word.word));
        }
        if definition_len > 0 && definition_len < self.rules.min_definition_length {
            self.warning(
                path,
                format!("Very short definition in {} word {}: \"{}\"", file, index, word.definition),
            );
        }
        if definition_len > self.rules.max_definition_length {
            self.warning(
                path,
                format!(
                    "Very long definition in {} word {} ({} characters, max {})",
                    file, index, definition_len, self.rules.max_definition_length
                ),
            );
        }
        if example_len > 0 && example_len < self.rules.min_example_length {
            self.warning(
                path,
                format!("Very short example in {} word {}: \"{}\"", file, index, word.example),
            );
        }
    }

    // Either all lower-case or capitalized, as in "cat" or "Monday"
    fn check_capitalization(&mut self, word: &WordEntry, path: &Path) {
        let text = word.word.trim();
        if text.is_empty() || text == text.to_lowercase() || text == capitalized(text) {
            return;
        }
        self.warning(
            path,
            format!("Unusual capitalization in English word \"{}\" in {}", text, path.display()),
        );
    }

    fn check_disallowed(&mut self, word: &WordEntry, index: usize, path: &Path) {
        for (field, value) in word.text_fields() {
            if !value.is_empty() && self.filter.is_flagged(value) {
                self.sink.add(
                    ValidationIssue::error(format!(
                        "Disallowed content detected in {} field of word {} in {}: \"{}\"",
                        field,
                        index,
                        path.display(),
                        value
                    ))
                    .in_file(path)
                    .with_context(format!("{}[{}]", field, index)),
                );
            }
        }
    }

    fn check_duplicates(&mut self, words: &[WordEntry], path: &Path) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order = Vec::new();
        for word in words {
            let key = word.key();
            if key.is_empty() {
                continue;
            }
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                order.push((key, word.word.trim().to_string()));
            }
            *count += 1;
        }

        for (key, display) in order {
            let count = counts[&key];
            if count > 1 {
                self.warning(
                    path,
                    format!(
                        "Duplicate word \"{}\" found {} times in {}",
                        display,
                        count,
                        path.display()
                    ),
                );
            }
        }
    }

    fn is_short_word_exempt(&self, unit: &VocabularyUnit, path: &Path) -> bool {
        let theme = unit.theme.as_deref().unwrap_or_default().to_lowercase();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.rules
            .short_word_exempt_themes
            .iter()
            .any(|marker| theme.contains(marker.as_str()) || stem.contains(marker.as_str()))
    }

    fn error(&mut self, path: &Path, message: String) {
        self.sink.add(ValidationIssue::error(message).in_file(path));
    }

    fn warning(&mut self, path: &Path, message: String) {
        self.sink.add(ValidationIssue::warning(message).in_file(path));
    }
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

#[async_trait]
impl Validator for ContentValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Content
    }

    async fn validate_file(&mut self, path: &Path) {
        self.sink.note(Level::Debug, &format!("Validating content: {}", path.display()));

        match load_unit(path).await {
            Ok(unit) => {
                let content_type =
                    extract_content_type_from_path(path).unwrap_or(ContentType::Vocabulary);
                self.validate_unit(&unit, path, content_type);
            }
            Err(e) => self.sink.add(ValidationIssue::error(e.to_string()).in_file(path)),
        }
    }

    fn result(&self) -> ValidationResult {
        self.sink.result()
    }

    fn clear(&mut self) {
        self.sink.clear();
    }
}
