use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Language utilities for the content tree
///
/// This module knows the fixed vocabulary of the data layout
/// (`data/<contentType>/<language>/<grade>/<unit>.json`): which languages,
/// content types and grade levels exist, how to pull them out of a path,
/// and which characters each language's translations may contain.
/// Languages with content in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    En,
    Es,
    Fr,
    Ar,
    Ko,
}

impl SupportedLanguage {
    /// Every supported language, in directory-scan order
    pub const ALL: [SupportedLanguage; 5] = [Self::En, Self::Es, Self::Fr, Self::Ar, Self::Ko];

    /// Two-letter code used as the directory name
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Ar => "ar",
            Self::Ko => "ko",
        }
    }

    /// English name of the language
    pub fn name(&self) -> &'static str {
        Language::from_639_1(self.code())
            .map(|lang| lang.to_name())
            .unwrap_or("Unknown")
    }

    /// Check a translation against this language's character allow-list
    pub fn allows_text(&self, text: &str) -> bool {
        let pattern: &Regex = match self {
            Self::En => &ENGLISH_PATTERN,
            Self::Es => &SPANISH_PATTERN,
            Self::Fr => &FRENCH_PATTERN,
            Self::Ar => &ARABIC_PATTERN,
            Self::Ko => &KOREAN_PATTERN,
        };
        pattern.is_match(text)
    }
}

impl std::fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for SupportedLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            "ar" => Ok(Self::Ar),
            "ko" => Ok(Self::Ko),
            _ => Err(anyhow!("Unsupported language code: {}", s)),
        }
    }
}

// Letters plus the shared punctuation set: whitespace - ' . , ! ?
static ENGLISH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-'.,!?]+$").expect("valid English pattern"));
static SPANISH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúñüÁÉÍÓÚÑÜ\s\-'.,!?]+$").expect("valid Spanish pattern")
});
static FRENCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZàâäéèêëïîôöùûüÿçÀÂÄÉÈÊËÏÎÔÖÙÛÜŸÇ\s\-'.,!?]+$")
        .expect("valid French pattern")
});
// Arabic block
static ARABIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{0600}-\x{06FF}\s\-'.,!?]+$").expect("valid Arabic pattern"));
// Hangul syllables block
static KOREAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{AC00}-\x{D7AF}\s\-'.,!?]+$").expect("valid Korean pattern"));

/// Kind of content a unit holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Vocabulary,
    Grammar,
    Spelling,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Vocabulary, Self::Grammar, Self::Spelling];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::Spelling => "spelling",
        }
    }

    /// Rule-based units use the narrower rules/words schema
    pub fn is_rule_based(&self) -> bool {
        !matches!(self, Self::Vocabulary)
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ct| ct.as_str() == segment)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grade directories, `grade-1` through `grade-5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// All grade levels in ascending order
    pub fn all() -> impl Iterator<Item = GradeLevel> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Directory name for this grade
    pub fn dir_name(&self) -> String {
        format!("grade-{}", self.0)
    }

    fn from_segment(segment: &str) -> Option<Self> {
        segment
            .strip_prefix("grade-")
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(Self::new)
    }
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "grade-{}", self.0)
    }
}

// Non-UTF-8 segments stay in place as "" so indices match the path's normal components
fn path_segments(path: &Path) -> Vec<&str> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_str().unwrap_or("")),
            _ => None,
        })
        .collect()
}

fn is_language_segment(segment: &str) -> bool {
    segment.parse::<SupportedLanguage>().is_ok()
}

/// Index of the language segment among the path's normal segments
///
/// The language is the segment right after the last `contentType` segment,
/// so language-named directories above the data root are never picked.
/// Only a path with no content-type segment at all falls back to the first
/// segment naming a language.
fn language_segment_index(segments: &[&str]) -> Option<usize> {
    let anchored = segments
        .windows(2)
        .rposition(|pair| ContentType::from_segment(pair[0]).is_some() && is_language_segment(pair[1]));
    if let Some(index) = anchored {
        return Some(index + 1);
    }

    if segments.iter().any(|s| ContentType::from_segment(s).is_some()) {
        return None;
    }
    segments.iter().position(|s| is_language_segment(s))
}

/// Language of a unit path, read from the segment after the content type
pub fn extract_language_from_path(path: &Path) -> Option<SupportedLanguage> {
    let segments = path_segments(path);
    language_segment_index(&segments).and_then(|index| segments[index].parse().ok())
}

/// Content type of a unit path
///
/// Prefers the segment in front of the language; otherwise the last segment
/// naming a content type.
pub fn extract_content_type_from_path(path: &Path) -> Option<ContentType> {
    let segments = path_segments(path);
    language_segment_index(&segments)
        .filter(|&index| index > 0)
        .and_then(|index| ContentType::from_segment(segments[index - 1]))
        .or_else(|| segments.iter().rev().find_map(|s| ContentType::from_segment(s)))
}

/// Grade of a unit path
///
/// Prefers the segment after the language; otherwise the first segment naming
/// a grade directory.
pub fn extract_grade_from_path(path: &Path) -> Option<GradeLevel> {
    let segments = path_segments(path);
    language_segment_index(&segments)
        .and_then(|index| segments.get(index + 1))
        .and_then(|s| GradeLevel::from_segment(s))
        .or_else(|| segments.iter().find_map(|s| GradeLevel::from_segment(s)))
}

/// Rewrite the language segment of a path
///
/// The segment replaced is the one `extract_language_from_path` reads;
/// returns `None` when the path carries no language segment.
pub fn replace_language_segment(path: &Path, language: SupportedLanguage) -> Option<PathBuf> {
    let target = language_segment_index(&path_segments(path))?;
    let mut normal_index = 0;
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(segment) => {
                if normal_index == target {
                    result.push(language.code());
                } else {
                    result.push(segment);
                }
                normal_index += 1;
            }
            other => result.push(other.as_os_str()),
        }
    }

    Some(result)
}

/// Validate that a code names a supported language
pub fn validate_language_code(code: &str) -> Result<SupportedLanguage> {
    code.parse()
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let language = validate_language_code(code)?;
    Ok(language.name().to_string())
}
