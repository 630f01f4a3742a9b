/*!
 * Async loading of unit files.
 */

use std::path::Path;

use serde_json::Value;

use crate::errors::DocumentError;

use super::model::VocabularyUnit;

/// Read a file as UTF-8 text.
async fn read_text(path: &Path) -> Result<String, DocumentError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    String::from_utf8(bytes).map_err(|_| DocumentError::InvalidEncoding(path.to_path_buf()))
}

/// Read and parse a file as JSON without interpreting its shape.
pub async fn parse_json(path: &Path) -> Result<Value, DocumentError> {
    let text = read_text(path).await?;
    serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, parse and normalize a unit file.
pub async fn load_unit(path: &Path) -> Result<VocabularyUnit, DocumentError> {
    let value = parse_json(path).await?;
    VocabularyUnit::from_value(value).map_err(|message| DocumentError::Shape {
        path: path.to_path_buf(),
        message,
    })
}
