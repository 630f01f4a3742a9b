/*!
 * Document model for word-list units.
 *
 * This module provides the in-memory representation of one unit file:
 * - `WordEntry` and `VocabularyUnit`, the canonical shape every validator reads
 * - Normalization of the flat (`words` at the top level) and nested
 *   (`vocabulary.words`) layouts at ingestion time
 * - Async loaders that turn read/encoding/parse problems into `DocumentError`
 */

pub mod loader;
pub mod model;

pub use loader::{load_unit, parse_json};
pub use model::{Difficulty, DocumentShape, REQUIRED_WORD_FIELDS, VocabularyUnit, WordEntry};
