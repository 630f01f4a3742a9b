/*!
 * JSON well-formedness checks.
 */

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::Level;

use crate::document::parse_json;
use crate::errors::DocumentError;

use super::issues::{IssueSink, ValidationIssue, ValidationResult};
use super::logger::ValidationLogger;
use super::validator::{Validator, ValidatorKind};

/// Reports files that are missing, not UTF-8, or not well-formed JSON
pub struct SyntaxValidator {
    sink: IssueSink,
}

impl SyntaxValidator {
    pub fn new(logger: Arc<dyn ValidationLogger>) -> Self {
        Self {
            sink: IssueSink::new(logger),
        }
    }
}

#[async_trait]
impl Validator for SyntaxValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Syntax
    }

    async fn validate_file(&mut self, path: &Path) {
        self.sink.note(Level::Debug, &format!("Validating JSON: {}", path.display()));

        match parse_json(path).await {
            Ok(_) => self.sink.record_file(path, 0),
            Err(e) => {
                let mut issue = ValidationIssue::error(e.to_string()).in_file(path);
                if let DocumentError::Parse { source, .. } = &e {
                    issue = issue.at(source.line(), source.column());
                }
                self.sink.add(issue);
            }
        }
    }

    fn result(&self) -> ValidationResult {
        self.sink.result()
    }

    fn clear(&mut self) {
        self.sink.clear();
    }
}
