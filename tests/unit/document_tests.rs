/*!
 * Tests for unit loading across both document layouts
 */

use anyhow::Result;
use serde_json::json;
use wordsik::document::{DocumentShape, load_unit};
use wordsik::errors::DocumentError;

use crate::common;

#[tokio::test]
async fn test_loadUnit_withBothLayouts_shouldYieldSameWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let words = vec![common::word("cat", "gato"), common::word("dog", "perro")];
    let flat = common::write_unit(temp_dir.path(), "vocabulary", "es", 1, 1, &common::flat_unit(1, "Animals", words.clone()))?;
    let nested = common::write_unit(
        temp_dir.path(),
        "vocabulary",
        "es",
        1,
        2,
        &common::nested_unit(1, "Animals", "es", words),
    )?;

    let flat_unit = load_unit(&flat).await?;
    let nested_unit = load_unit(&nested).await?;

    assert_eq!(flat_unit.shape, DocumentShape::Flat);
    assert_eq!(nested_unit.shape, DocumentShape::Nested);
    assert_eq!(flat_unit.words(), nested_unit.words());
    assert_eq!(nested_unit.language.as_deref(), Some("es"));
    assert_eq!(nested_unit.week.as_deref(), Some("1"));
    Ok(())
}

#[test]
fn test_loadUnit_withNumericWeek_shouldKeepItAsText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "week-4.json",
        &json!({ "week": 4, "theme": "Food", "words": [] }).to_string(),
    )?;

    let unit = tokio_test::block_on(load_unit(&path))?;

    assert_eq!(unit.week.as_deref(), Some("4"));
    assert!(unit.has_word_list());
    Ok(())
}

#[tokio::test]
async fn test_loadUnit_withWordThatIsNotAnObject_shouldFailWithShapeError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "week-1.json",
        r#"{ "week": "1", "theme": "Food", "words": ["apple"] }"#,
    )?;

    let error = load_unit(&path).await.unwrap_err();

    assert!(matches!(error, DocumentError::Shape { .. }));
    assert!(error.to_string().contains("word 0 is not an object"));
    Ok(())
}
