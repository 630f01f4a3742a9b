/*!
 * The capability shared by all validators.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use super::issues::ValidationResult;

/// Which validator a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    /// JSON well-formedness
    Syntax,
    /// Structure, disallowed content, length heuristics
    Content,
    /// Cross-language consistency against the base language
    Translation,
    /// Per-language character sets and directory layout
    Locale,
}

impl ValidatorKind {
    /// Every kind, in the order a full run invokes them
    pub const ALL: [ValidatorKind; 4] = [Self::Syntax, Self::Content, Self::Translation, Self::Locale];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Content => "content",
            Self::Translation => "translation",
            Self::Locale => "locale",
        }
    }
}

/// Common interface for all validators
///
/// `validate_file` never fails: read and parse problems become error issues
/// tagged with the file, and the next file is still checked.
#[async_trait]
pub trait Validator: Send {
    fn kind(&self) -> ValidatorKind;

    /// Check one unit file, accumulating issues
    async fn validate_file(&mut self, path: &Path);

    /// Check several files in order
    async fn validate_files(&mut self, paths: &[PathBuf]) {
        for path in paths {
            self.validate_file(path).await;
        }
    }

    /// Snapshot of the accumulated issues; does not reset anything
    fn result(&self) -> ValidationResult;

    /// Forget all accumulated issues so the validator can be reused
    fn clear(&mut self);
}
