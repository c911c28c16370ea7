//! JSON diff documents accepted by the command-line tool.
//!
//! A document is either a bare array of [`DiffLine`] records or an object
//! carrying the compared files alongside the lines:
//!
//! ```json
//! {
//!   "original_file": { "name": "src/config.rs" },
//!   "modified_file": { "name": "src/settings.rs", "language": "rust" },
//!   "lines": [
//!     { "kind": "removed", "original_line_number": 2, "original_content": "a" },
//!     { "kind": "added", "modified_line_number": 2, "modified_content": "b" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::export::ExportError;

use super::{DiffLine, FileInfo};

/// Diff lines plus optional metadata for both compared files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffDocument {
    /// The file on the left-hand side of the comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file: Option<FileInfo>,
    /// The file on the right-hand side of the comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_file: Option<FileInfo>,
    /// Diff records in file order.
    #[serde(default)]
    pub lines: Vec<DiffLine>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Lines(Vec<DiffLine>),
    Document(DiffDocument),
}

impl DiffDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidInput`] when the text is neither a line
    /// array nor a document object.
    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        let shape: DocumentShape =
            serde_json::from_str(text).map_err(|error| ExportError::InvalidInput {
                message: format!("expected a diff line array or document object: {error}"),
            })?;
        Ok(match shape {
            DocumentShape::Lines(lines) => Self {
                lines,
                ..Self::default()
            },
            DocumentShape::Document(document) => document,
        })
    }
}
