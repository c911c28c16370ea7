//! The contract every export format implements.

use camino::Utf8Path;

use crate::diff::{DiffLine, FileInfo};

use super::error::ExportError;
use super::model::ExportContent;
use super::options::ExportOptions;

/// A format-specific transformation from diff lines to exported content.
///
/// Implementations must be deterministic: the same lines and options always
/// produce byte-identical content.
pub trait Renderer: Send + Sync {
    /// Renders `lines` using the renderer's section of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Render`] if the renderer cannot assemble its
    /// document.
    fn render(&self, lines: &[DiffLine], options: &ExportOptions)
    -> Result<ExportContent, ExportError>;

    /// Media type of the documents this renderer produces.
    fn mime_type(&self) -> &'static str;

    /// Conventional file extension, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Derives a default filename from the available file metadata.
    ///
    /// Always returns a non-empty name ending in [`Self::file_extension`].
    fn generate_filename(&self, original: Option<&FileInfo>, modified: Option<&FileInfo>) -> String {
        derive_filename(original, modified, self.file_extension())
    }
}

/// Stem used when no file metadata yields a usable name.
pub const FALLBACK_STEM: &str = "diff-export";

/// Builds a filename from the stems of the compared files.
///
/// - both present and different: `{original}-vs-{modified}-diff.{ext}`
/// - one present (or both equal): `{stem}-diff.{ext}`
/// - none: `diff-export.{ext}`
#[must_use]
pub fn derive_filename(
    original: Option<&FileInfo>,
    modified: Option<&FileInfo>,
    extension: &str,
) -> String {
    let original_stem = original.and_then(file_stem);
    let modified_stem = modified.and_then(file_stem);

    let stem = match (original_stem, modified_stem) {
        (Some(a), Some(b)) if a != b => format!("{a}-vs-{b}-diff"),
        (Some(single), _) | (None, Some(single)) => format!("{single}-diff"),
        (None, None) => FALLBACK_STEM.to_owned(),
    };
    format!("{stem}.{extension}")
}

fn file_stem(info: &FileInfo) -> Option<String> {
    let stem = Utf8Path::new(info.name.trim()).file_stem()?;
    let sanitised = sanitize_segment(stem);
    if sanitised.trim_matches(['-', '.']).is_empty() {
        None
    } else {
        Some(sanitised)
    }
}

fn sanitize_segment(segment: &str) -> String {
    const fn is_safe_for_filename(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.'
    }

    segment
        .chars()
        .map(|ch| if is_safe_for_filename(ch) { ch } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn info(name: &str) -> FileInfo {
        FileInfo::named(name)
    }

    #[rstest]
    #[case(Some("src/old.rs"), Some("src/new.rs"), "old-vs-new-diff.html")]
    #[case(Some("main.rs"), Some("main.rs"), "main-diff.html")]
    #[case(Some("left.txt"), None, "left-diff.html")]
    #[case(None, Some("right.txt"), "right-diff.html")]
    #[case(None, None, "diff-export.html")]
    #[case(Some("my file (1).rs"), None, "my-file--1--diff.html")]
    #[case(Some("   "), Some(""), "diff-export.html")]
    fn derives_names(
        #[case] original: Option<&str>,
        #[case] modified: Option<&str>,
        #[case] expected: &str,
    ) {
        let original_info = original.map(info);
        let modified_info = modified.map(info);

        let name = derive_filename(original_info.as_ref(), modified_info.as_ref(), "html");

        assert_eq!(name, expected);
    }

    #[rstest]
    fn directory_components_never_leak_into_name() {
        let name = derive_filename(Some(&info("../../etc/passwd")), None, "txt");

        assert_eq!(name, "passwd-diff.txt");
    }
}
