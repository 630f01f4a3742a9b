/*!
 * Tests for language, content type and path utilities
 */

use std::path::{Path, PathBuf};

use wordsik::language_utils::{
    ContentType, GradeLevel, SupportedLanguage, extract_content_type_from_path, extract_grade_from_path,
    extract_language_from_path, get_language_name, replace_language_segment, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withSupportedCodes_shouldSucceed() {
    assert_eq!(validate_language_code("en").unwrap(), SupportedLanguage::En);
    assert_eq!(validate_language_code(" KO ").unwrap(), SupportedLanguage::Ko);
}

#[test]
fn test_validateLanguageCode_withUnsupportedCode_shouldFail() {
    let error = validate_language_code("de").unwrap_err();

    assert!(error.to_string().contains("Unsupported language code"));
}

#[test]
fn test_getLanguageName_shouldUseEnglishNames() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("ar").unwrap(), "Arabic");
    assert_eq!(get_language_name("ko").unwrap(), "Korean");
}

#[test]
fn test_extractFromPath_shouldReadEverySegment() {
    let path = Path::new("data/grammar/fr/grade-3/week-7.json");

    assert_eq!(extract_language_from_path(path), Some(SupportedLanguage::Fr));
    assert_eq!(extract_content_type_from_path(path), Some(ContentType::Grammar));
    assert_eq!(extract_grade_from_path(path).map(|g| g.level()), Some(3));
}

#[test]
fn test_extractGradeFromPath_withOutOfRangeGrade_shouldReturnNone() {
    assert_eq!(extract_grade_from_path(Path::new("data/vocabulary/en/grade-9/week-1.json")), None);
}

#[test]
fn test_replaceLanguageSegment_shouldSwapOnlyTheContentTypeLanguage() {
    let path = Path::new("data/vocabulary/es/grade-1/es/week-1.json");

    let replaced = replace_language_segment(path, SupportedLanguage::En);

    assert_eq!(replaced, Some(PathBuf::from("data/vocabulary/en/grade-1/es/week-1.json")));
}

#[test]
fn test_extractLanguageFromPath_withLanguageNamedAncestor_shouldUseSegmentAfterContentType() {
    let path = Path::new("/home/ar/repo/data/vocabulary/es/grade-1/week-1.json");

    assert_eq!(extract_language_from_path(path), Some(SupportedLanguage::Es));
    assert_eq!(extract_content_type_from_path(path), Some(ContentType::Vocabulary));
    assert_eq!(extract_grade_from_path(path).map(|g| g.level()), Some(1));
    assert_eq!(
        replace_language_segment(path, SupportedLanguage::En),
        Some(PathBuf::from("/home/ar/repo/data/vocabulary/en/grade-1/week-1.json"))
    );
}

#[test]
fn test_extractLanguageFromPath_withoutContentType_shouldFallBackToFirstLanguage() {
    assert_eq!(extract_language_from_path(Path::new("exports/ko/week-1.json")), Some(SupportedLanguage::Ko));
}

#[test]
fn test_extractLanguageFromPath_withContentTypeButNoLanguage_shouldReturnNone() {
    assert_eq!(extract_language_from_path(Path::new("/srv/es/data/vocabulary/grade-1/week-1.json")), None);
}

#[test]
fn test_replaceLanguageSegment_withoutLanguage_shouldReturnNone() {
    assert_eq!(replace_language_segment(Path::new("data/misc/week-1.json"), SupportedLanguage::En), None);
}

#[test]
fn test_allowsText_shouldApplyPerLanguageAlphabets() {
    assert!(SupportedLanguage::En.allows_text("ice-cream, please!"));
    assert!(!SupportedLanguage::En.allows_text("café"));
    assert!(SupportedLanguage::Fr.allows_text("café crème"));
    assert!(SupportedLanguage::Es.allows_text("pingüino"));
    assert!(!SupportedLanguage::Es.allows_text("3 gatos"));
    assert!(SupportedLanguage::Ar.allows_text("كتاب"));
    assert!(SupportedLanguage::Ko.allows_text("학교"));
    assert!(!SupportedLanguage::Ko.allows_text("ㅎ"));
}

#[test]
fn test_gradeLevel_all_shouldCoverOneToFive() {
    let names: Vec<String> = GradeLevel::all().map(|g| g.dir_name()).collect();

    assert_eq!(names, vec!["grade-1", "grade-2", "grade-3", "grade-4", "grade-5"]);
    assert!(GradeLevel::new(0).is_none());
}

#[test]
fn test_contentType_isRuleBased_shouldExcludeVocabulary() {
    assert!(!ContentType::Vocabulary.is_rule_based());
    assert!(ContentType::Grammar.is_rule_based());
    assert!(ContentType::Spelling.is_rule_based());
}
