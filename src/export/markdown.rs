//! Markdown renderer.
//!
//! Generates a readable Markdown document: a title heading, the compared
//! files with their language, an optional change summary, and the diff body
//! in a fenced `diff` code block.

use std::io::Write;

use camino::Utf8Path;

use crate::diff::{DiffLine, DiffLineKind, FileInfo};

use super::error::ExportError;
use super::model::ExportContent;
use super::options::ExportOptions;
use super::plaintext::diff_body;
use super::renderer::Renderer;

/// Placeholder body for an empty diff.
pub const EMPTY_BODY: &str = "_No differences._";

/// Renders diffs as Markdown documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(
        &self,
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<ExportContent, ExportError> {
        let mut buffer = Vec::new();
        write_document(&mut buffer, lines, options)?;
        let text = String::from_utf8(buffer).map_err(|error| ExportError::Render {
            message: format!("markdown output is not UTF-8: {error}"),
        })?;
        Ok(ExportContent::Text(text))
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }
}

/// Writes the complete Markdown document for `lines` to `writer`.
fn write_document<W: Write>(
    writer: &mut W,
    lines: &[DiffLine],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    writeln!(writer, "# {}", options.resolved_title()).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    write_file_metadata(writer, options)?;

    if options.markdown.include_summary {
        writeln!(writer, "{}", ChangeSummary::of(lines)).map_err(|e| io_error(&e))?;
        writeln!(writer).map_err(|e| io_error(&e))?;
    }

    if lines.is_empty() {
        writeln!(writer, "{EMPTY_BODY}").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    let body = diff_body(lines, options.markdown.show_line_numbers).join("\n");
    let fence = compute_fence(&body);
    writeln!(writer, "{fence}diff").map_err(|e| io_error(&e))?;
    writeln!(writer, "{body}").map_err(|e| io_error(&e))?;
    writeln!(writer, "{fence}").map_err(|e| io_error(&e))?;
    Ok(())
}

/// Writes one line per known file, with a language hint when available.
fn write_file_metadata<W: Write>(writer: &mut W, options: &ExportOptions) -> Result<(), ExportError> {
    let files = [
        ("Original", options.original_file.as_ref()),
        ("Modified", options.modified_file.as_ref()),
    ];
    let mut wrote_any = false;
    for (label, file) in files {
        let Some(file) = file else { continue };
        let name = inline_code(&file.name);
        let written = match language_of(file) {
            Some(language) => writeln!(writer, "- **{label}:** {name} ({language})"),
            None => writeln!(writer, "- **{label}:** {name}"),
        };
        written.map_err(|e| io_error(&e))?;
        wrote_any = true;
    }
    if wrote_any {
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Per-kind line counts for the summary line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ChangeSummary {
    added: usize,
    removed: usize,
    modified: usize,
    unchanged: usize,
}

impl ChangeSummary {
    fn of(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut summary, line| {
            let slot = match line.kind {
                DiffLineKind::Added => &mut summary.added,
                DiffLineKind::Removed => &mut summary.removed,
                DiffLineKind::Modified => &mut summary.modified,
                DiffLineKind::Unchanged => &mut summary.unchanged,
            };
            *slot = slot.saturating_add(1);
            summary
        })
    }
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "**Summary:** +{} added, -{} removed, ~{} modified, {} unchanged",
            self.added, self.removed, self.modified, self.unchanged
        )
    }
}

/// Returns the explicit language of `file`, or one inferred from its
/// extension.
fn language_of(file: &FileInfo) -> Option<&str> {
    file.language
        .as_deref()
        .filter(|language| !language.is_empty())
        .or_else(|| {
            Utf8Path::new(&file.name)
                .extension()
                .and_then(extension_to_language)
        })
}

/// Computes a fence string that exceeds any backtick run in the content.
fn compute_fence(content: &str) -> String {
    let max_backticks = longest_backtick_run(content);
    "`".repeat(max_backticks.max(2).saturating_add(1))
}

/// Wraps `text` in an inline code span that survives embedded backticks.
fn inline_code(text: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(text).saturating_add(1));
    if text.starts_with('`') || text.ends_with('`') {
        format!("{ticks} {text} {ticks}")
    } else {
        format!("{ticks}{text}{ticks}")
    }
}

fn longest_backtick_run(content: &str) -> usize {
    content.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Extension-to-language mapping entries.
const EXTENSION_MAPPINGS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("jsx", "jsx"),
    ("tsx", "tsx"),
    ("rb", "ruby"),
    ("go", "go"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("h", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("php", "php"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("sql", "sql"),
    ("md", "markdown"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("xml", "xml"),
    ("html", "html"),
    ("css", "css"),
];

/// Maps a file extension to a language name, if it is a known one.
fn extension_to_language(ext: &str) -> Option<&'static str> {
    let ext_lower = ext.to_lowercase();
    EXTENSION_MAPPINGS
        .iter()
        .find(|(e, _)| *e == ext_lower)
        .map(|(_, lang)| *lang)
}

fn io_error(error: &std::io::Error) -> ExportError {
    ExportError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
