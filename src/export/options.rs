//! Options forwarded to renderers.
//!
//! The exporter reads only `filename`, `original_file` and `modified_file`;
//! everything else passes through untouched to the selected renderer, which
//! picks out its own section.

use serde::{Deserialize, Serialize};

use crate::diff::FileInfo;

/// Caller-supplied configuration for a single export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Filename override; used verbatim when non-empty.
    pub filename: Option<String>,
    /// Metadata for the original file.
    pub original_file: Option<FileInfo>,
    /// Metadata for the modified file.
    pub modified_file: Option<FileInfo>,
    /// Document title shared by all renderers.
    pub title: Option<String>,
    /// Options read by the HTML renderer.
    pub html: HtmlOptions,
    /// Options read by the plain text renderer.
    pub plaintext: PlaintextOptions,
    /// Options read by the Markdown renderer.
    pub markdown: MarkdownOptions,
}

impl ExportOptions {
    /// Returns the caller's filename override, ignoring blank values.
    #[must_use]
    pub fn filename_override(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the configured title or one derived from the file names.
    #[must_use]
    pub fn resolved_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            return title.to_owned();
        }
        match (&self.original_file, &self.modified_file) {
            (Some(original), Some(modified)) if original.name != modified.name => {
                format!("Diff: {} → {}", original.name, modified.name)
            }
            (Some(file), _) | (None, Some(file)) => format!("Diff: {}", file.name),
            (None, None) => DEFAULT_TITLE.to_owned(),
        }
    }

    /// Returns the original file's name, if known.
    #[must_use]
    pub fn original_name(&self) -> Option<&str> {
        self.original_file.as_ref().map(|file| file.name.as_str())
    }

    /// Returns the modified file's name, if known.
    #[must_use]
    pub fn modified_name(&self) -> Option<&str> {
        self.modified_file.as_ref().map(|file| file.name.as_str())
    }
}

/// Title used when neither a title nor any file names are available.
pub const DEFAULT_TITLE: &str = "Diff Export";

/// HTML renderer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Renders original and modified line-number gutters.
    pub show_line_numbers: bool,
    /// Embeds the default stylesheet in the document head.
    pub inline_styles: bool,
    /// Applies syntax highlighting to line content.
    pub highlight: bool,
    /// Name of the syntect theme used when highlighting.
    pub theme: String,
    /// Wraps the diff table in an SVG `foreignObject` and returns it as a
    /// binary `image/svg+xml` artifact.
    pub svg: bool,
    /// Minimum width in pixels of the SVG canvas.
    pub svg_min_width: u32,
}

/// Default syntect theme for HTML highlighting.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            inline_styles: true,
            highlight: false,
            theme: DEFAULT_THEME.to_owned(),
            svg: false,
            svg_min_width: 800,
        }
    }
}

/// Plain text renderer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaintextOptions {
    /// Prefixes each line with original and modified line numbers.
    pub show_line_numbers: bool,
    /// Writes the title and `---`/`+++` file header.
    pub include_header: bool,
}

impl Default for PlaintextOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            include_header: true,
        }
    }
}

/// Markdown renderer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Writes the added/removed/modified counts above the code block.
    pub include_summary: bool,
    /// Prefixes each line inside the code block with its line numbers.
    pub show_line_numbers: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            include_summary: true,
            show_line_numbers: false,
        }
    }
}
