//! Diff-line records consumed by the export layer.
//!
//! These types describe the output of an upstream line-level comparison. The
//! export layer never computes or validates diffs; it only walks the records
//! in order and hands them to a renderer.

use serde::{Deserialize, Serialize};

mod document;

pub use document::DiffDocument;

/// Classification of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    /// Present unchanged on both sides.
    Unchanged,
    /// Present only in the modified file.
    Added,
    /// Present only in the original file.
    Removed,
    /// Present on both sides with different content.
    Modified,
}

impl DiffLineKind {
    /// Returns the single-character marker used by unified diff output.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Unchanged => ' ',
            Self::Added => '+',
            Self::Removed => '-',
            Self::Modified => '~',
        }
    }

    /// Returns the lowercase name used for CSS classes and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }
}

/// One line of a computed diff.
///
/// Line numbers and contents are optional because each kind only populates
/// the side(s) it exists on: an added line has no original number, a removed
/// line has no modified content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// How this line differs between the two files.
    pub kind: DiffLineKind,
    /// 1-based line number in the original file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_line_number: Option<u32>,
    /// 1-based line number in the modified file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_line_number: Option<u32>,
    /// Text of the line in the original file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    /// Text of the line in the modified file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_content: Option<String>,
}

impl DiffLine {
    /// Creates a line present unchanged on both sides.
    #[must_use]
    pub fn unchanged(original: u32, modified: u32, content: impl Into<String>) -> Self {
        let text = content.into();
        Self {
            kind: DiffLineKind::Unchanged,
            original_line_number: Some(original),
            modified_line_number: Some(modified),
            original_content: Some(text.clone()),
            modified_content: Some(text),
        }
    }

    /// Creates a line that only exists in the modified file.
    #[must_use]
    pub fn added(modified: u32, content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Added,
            original_line_number: None,
            modified_line_number: Some(modified),
            original_content: None,
            modified_content: Some(content.into()),
        }
    }

    /// Creates a line that only exists in the original file.
    #[must_use]
    pub fn removed(original: u32, content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Removed,
            original_line_number: Some(original),
            modified_line_number: None,
            original_content: Some(content.into()),
            modified_content: None,
        }
    }

    /// Creates a line whose content changed between the two files.
    #[must_use]
    pub fn modified(
        original: u32,
        modified: u32,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            kind: DiffLineKind::Modified,
            original_line_number: Some(original),
            modified_line_number: Some(modified),
            original_content: Some(before.into()),
            modified_content: Some(after.into()),
        }
    }

    /// Returns the text shown for the original side, if any.
    #[must_use]
    pub fn original_text(&self) -> Option<&str> {
        self.original_content.as_deref()
    }

    /// Returns the text shown for the modified side, falling back to the
    /// original content for unchanged lines that only carry one copy.
    #[must_use]
    pub fn modified_text(&self) -> Option<&str> {
        match self.kind {
            DiffLineKind::Unchanged => self
                .modified_content
                .as_deref()
                .or(self.original_content.as_deref()),
            _ => self.modified_content.as_deref(),
        }
    }
}

/// Metadata about one side of the comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// File name or path as known to the caller.
    pub name: String,
    /// Optional language hint for syntax highlighting (e.g. `rust`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FileInfo {
    /// Creates file metadata with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn deserialises_snake_case_kinds() {
        let line: DiffLine = serde_json::from_str(
            r#"{"kind":"added","modified_line_number":3,"modified_content":"let x = 1;"}"#,
        )
        .expect("valid diff line");

        assert_eq!(line, DiffLine::added(3, "let x = 1;"));
    }

    #[rstest]
    fn unchanged_line_falls_back_to_original_content() {
        let line = DiffLine {
            kind: DiffLineKind::Unchanged,
            original_line_number: Some(1),
            modified_line_number: Some(1),
            original_content: Some("same".to_owned()),
            modified_content: None,
        };

        assert_eq!(line.modified_text(), Some("same"));
    }

    #[rstest]
    #[case(DiffLineKind::Unchanged, ' ')]
    #[case(DiffLineKind::Added, '+')]
    #[case(DiffLineKind::Removed, '-')]
    #[case(DiffLineKind::Modified, '~')]
    fn kind_markers(#[case] kind: DiffLineKind, #[case] expected: char) {
        assert_eq!(kind.marker(), expected);
    }
}
