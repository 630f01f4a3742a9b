/*!
 * Core document model types for word-list units.
 *
 * Units are read once, handed to the validators and dropped; nothing here
 * mutates a unit after construction.
 */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Pedagogical difficulty tier of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse one of the sanctioned levels, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// The four text fields every vocabulary word carries.
pub const REQUIRED_WORD_FIELDS: [&str; 4] = ["word", "translation", "definition", "example"];

/// A single word with its annotations.
///
/// Text fields that are absent or not strings decode to an empty string so
/// one bad word never fails the whole file. Required fields that held a
/// non-string value are listed in `mistyped_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub translation: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub definition: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub example: String,

    /// Raw difficulty as written; see `difficulty_level`
    #[serde(default, deserialize_with = "lenient_scalar", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    #[serde(default, deserialize_with = "lenient_scalar", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Required fields present in the document with a non-string value
    #[serde(skip)]
    pub mistyped_fields: Vec<&'static str>,
}

impl WordEntry {
    /// Create an entry with the four required fields set.
    pub fn new(word: &str, translation: &str, definition: &str, example: &str) -> Self {
        Self {
            word: word.to_string(),
            translation: translation.to_string(),
            definition: definition.to_string(),
            example: example.to_string(),
            difficulty: None,
            category: None,
            mistyped_fields: Vec::new(),
        }
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: &str) -> Self {
        self.difficulty = Some(difficulty.to_string());
        self
    }

    /// Lookup key: trimmed and lower-cased. Display keeps `word` as written.
    pub fn key(&self) -> String {
        normalize_key(&self.word)
    }

    /// Parsed difficulty, `None` when absent or not a sanctioned level.
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        self.difficulty.as_deref().and_then(Difficulty::parse)
    }

    /// The text fields paired with their names, in document order.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("word", self.word.as_str()),
            ("translation", self.translation.as_str()),
            ("definition", self.definition.as_str()),
            ("example", self.example.as_str()),
        ];
        if let Some(category) = &self.category {
            fields.push(("category", category.as_str()));
        }
        fields
    }
}

/// Normalize a word for key comparisons.
pub fn normalize_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Which on-disk layout a unit used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentShape {
    /// `{ week, theme, words: [...] }`
    Flat,
    /// `{ metadata: {...}, vocabulary: { words: [...] }, ... }`
    Nested,
}

/// One unit (a week of vocabulary, grammar or spelling) in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyUnit {
    pub week: Option<String>,
    pub theme: Option<String>,
    pub language: Option<String>,
    pub grade: Option<String>,
    /// `None` when the document has no word list at all
    pub word_list: Option<Vec<WordEntry>>,
    /// Rule list of grammar/spelling units, kept as raw JSON
    pub rules: Option<Value>,
    pub shape: DocumentShape,
}

impl VocabularyUnit {
    /// Build a flat unit from words; mostly useful for tests and tooling.
    pub fn from_words(week: &str, theme: &str, words: Vec<WordEntry>) -> Self {
        Self {
            week: Some(week.to_string()),
            theme: Some(theme.to_string()),
            language: None,
            grade: None,
            word_list: Some(words),
            rules: None,
            shape: DocumentShape::Flat,
        }
    }

    /// The unit's words; empty when there is no word list.
    pub fn words(&self) -> &[WordEntry] {
        self.word_list.as_deref().unwrap_or(&[])
    }

    pub fn has_word_list(&self) -> bool {
        self.word_list.is_some()
    }

    /// Whether the unit carries a rule list (present and an array).
    pub fn has_rule_list(&self) -> bool {
        self.rules.as_ref().is_some_and(Value::is_array)
    }

    /// Normalize a parsed JSON document into a unit.
    ///
    /// Top-level values win over `metadata` values; a top-level `words` list
    /// wins over `vocabulary.words`.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err("expected a JSON object at the top level".to_string());
        }

        let raw: RawUnit = serde_json::from_value(value).map_err(|e| e.to_string())?;
        let metadata = raw.metadata.unwrap_or_default();

        let (shape, words_value) = match (raw.words, raw.vocabulary) {
            (Some(words), _) => (DocumentShape::Flat, Some(words)),
            (None, Some(vocabulary)) => (DocumentShape::Nested, vocabulary.words),
            (None, None) => (DocumentShape::Flat, None),
        };

        let word_list = words_value.map(decode_words).transpose()?;

        Ok(Self {
            week: raw.week.or(metadata.week),
            theme: raw.theme.or(metadata.theme),
            language: raw.language.or(metadata.language),
            grade: raw.grade.or(metadata.grade),
            word_list,
            rules: raw.rules,
            shape,
        })
    }
}

fn decode_words(value: Value) -> Result<Vec<WordEntry>, String> {
    let Value::Array(items) = value else {
        return Err("'words' field must be an array".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(format!("word {} is not an object", index));
            }
            let mistyped_fields: Vec<&'static str> = REQUIRED_WORD_FIELDS
                .into_iter()
                .filter(|field| item.get(field).is_some_and(|v| !v.is_string() && !v.is_null()))
                .collect();
            let mut entry: WordEntry =
                serde_json::from_value(item).map_err(|e| format!("word {}: {}", index, e))?;
            entry.mistyped_fields = mistyped_fields;
            Ok(entry)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    #[serde(default, deserialize_with = "lenient_scalar")]
    week: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    theme: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    language: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    grade: Option<String>,
    #[serde(default)]
    words: Option<Value>,
    #[serde(default)]
    vocabulary: Option<RawVocabulary>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    rules: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawVocabulary {
    #[serde(default)]
    words: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default, deserialize_with = "lenient_scalar")]
    week: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    theme: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    language: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    grade: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

// Strings, numbers and booleans are kept as text; anything else is dropped.
fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
