//! Shared test utilities for export tests.
//!
//! This module provides sample diff data, a fixed-output renderer for
//! registry and orchestrator tests, and substring assertions that return
//! errors instead of panicking.

use crate::diff::{DiffLine, FileInfo};

use super::error::ExportError;
use super::model::{Artifact, ExportContent};
use super::options::ExportOptions;
use super::renderer::Renderer;

/// Test data constants to reduce string argument repetition.
pub mod test_data {
    /// Sample original file name.
    pub const ORIGINAL_NAME: &str = "src/config.rs";
    /// Sample modified file name.
    pub const MODIFIED_NAME: &str = "src/settings.rs";
    /// Content of the sample removed line.
    pub const REMOVED_TEXT: &str = "let retries = 3;";
    /// Content of the sample added line.
    pub const ADDED_TEXT: &str = "let retries = 5;";
    /// Sample content needing HTML escaping.
    pub const MARKUP_TEXT: &str = "if a < b && c > \"d\" {";
}

/// Returns a short diff touching every line kind, in file order.
#[must_use]
pub fn sample_lines() -> Vec<DiffLine> {
    vec![
        DiffLine::unchanged(1, 1, "fn main() {"),
        DiffLine::removed(2, test_data::REMOVED_TEXT),
        DiffLine::added(2, test_data::ADDED_TEXT),
        DiffLine::modified(3, 3, "    run(retries);", "    run_with(retries);"),
        DiffLine::unchanged(4, 4, "}"),
    ]
}

/// Returns options naming both sample files.
#[must_use]
pub fn sample_options() -> ExportOptions {
    ExportOptions {
        original_file: Some(FileInfo::named(test_data::ORIGINAL_NAME)),
        modified_file: Some(FileInfo::named(test_data::MODIFIED_NAME)),
        ..Default::default()
    }
}

/// A renderer returning fixed content, for exercising dispatch.
#[derive(Debug, Clone)]
pub struct StaticRenderer {
    content: ExportContent,
}

impl StaticRenderer {
    /// Media type declared by every [`StaticRenderer`].
    pub const MIME_TYPE: &'static str = "application/x-static";

    /// Creates a renderer that always returns `text`.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            content: ExportContent::Text(text.to_owned()),
        }
    }

    /// Creates a renderer that always returns a binary artifact.
    #[must_use]
    pub fn binary(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            content: ExportContent::Binary(Artifact::new(bytes.to_vec(), mime_type)),
        }
    }
}

impl Renderer for StaticRenderer {
    fn render(
        &self,
        _lines: &[DiffLine],
        _options: &ExportOptions,
    ) -> Result<ExportContent, ExportError> {
        Ok(self.content.clone())
    }

    fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    fn file_extension(&self) -> &'static str {
        "static"
    }
}

/// Asserts that `haystack` contains `needle`, returning an error if not.
///
/// # Errors
///
/// Returns a description of the mismatch when `needle` is absent.
pub fn assert_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!(
            "expected output to contain '{needle}', got:\n{haystack}"
        ))
    }
}

/// Asserts that `haystack` does NOT contain `needle`, returning an error if it does.
///
/// # Errors
///
/// Returns a description of the mismatch when `needle` is present.
pub fn assert_not_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Err(format!(
            "expected output to NOT contain '{needle}', got:\n{haystack}"
        ))
    } else {
        Ok(())
    }
}
