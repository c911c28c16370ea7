//! HTML renderer.
//!
//! Renders a standalone HTML5 document through `minijinja` templates with
//! HTML auto-escaping. Line content is escaped (or syntax highlighted with
//! `syntect`) before it reaches the template and is inserted with `|safe`.
//!
//! With [`HtmlOptions::svg`](super::HtmlOptions::svg) set, the same table is
//! embedded in an SVG `foreignObject` and returned as a binary
//! `image/svg+xml` artifact.

use std::convert::Infallible;
use std::sync::OnceLock;

use camino::Utf8Path;
use minijinja::{AutoEscape, Environment, HtmlEscape, context};
use serde::Serialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::diff::{DiffLine, DiffLineKind, FileInfo};

use super::error::ExportError;
use super::model::{Artifact, ExportContent};
use super::options::ExportOptions;
use super::renderer::Renderer;

/// Media type of the vector-graphics mode.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

const DOCUMENT_TEMPLATE: &str = "document.html";
const SVG_TEMPLATE: &str = "diff.svg";

const TEMPLATES: &[(&str, &str)] = &[
    (DOCUMENT_TEMPLATE, include_str!("templates/document.html")),
    (SVG_TEMPLATE, include_str!("templates/diff.svg")),
    ("table.html", include_str!("templates/table.html")),
    ("styles.css", include_str!("templates/styles.css")),
];

/// SVG canvas metrics, in pixels.
mod svg_metrics {
    pub const ROW_HEIGHT: u32 = 20;
    pub const HEADER_HEIGHT: u32 = 64;
    pub const PADDING: u32 = 32;
    pub const CHAR_WIDTH: u32 = 8;
    pub const GUTTER_WIDTH: u32 = 120;
}

/// Errors raised while preparing syntax highlighting.
///
/// These never escape the renderer: any of them makes the document fall back
/// to escaped plain text.
#[derive(Debug, Error)]
enum HighlightError {
    /// Neither file maps to a known syntax.
    #[error("no syntax found for the compared files")]
    NoSyntaxFound,
    /// The configured theme is not bundled.
    #[error("unknown highlighting theme: {theme}")]
    UnknownTheme {
        /// Requested theme name.
        theme: String,
    },
    /// Syntect failed on a line.
    #[error("highlighting failed: {message}")]
    HighlightFailed {
        /// Description of the failure.
        message: String,
    },
}

impl From<syntect::Error> for HighlightError {
    fn from(error: syntect::Error) -> Self {
        Self::HighlightFailed {
            message: error.to_string(),
        }
    }
}

/// Syntax and theme sets, loaded on first highlighted render.
#[derive(Debug)]
struct HighlightAssets {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

/// Renders diffs as HTML documents or SVG images.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    assets: OnceLock<HighlightAssets>,
}

impl HtmlRenderer {
    /// Creates a renderer; highlighting assets load lazily.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn assets(&self) -> &HighlightAssets {
        self.assets.get_or_init(|| HighlightAssets {
            syntaxes: SyntaxSet::load_defaults_nonewlines(),
            themes: ThemeSet::load_defaults(),
        })
    }

    fn rows(&self, lines: &[DiffLine], options: &ExportOptions) -> Vec<RowView> {
        if options.html.highlight {
            match self.highlighted_rows(lines, options) {
                Ok(rows) => return rows,
                Err(error) => {
                    tracing::debug!("falling back to plain HTML rows: {error}");
                }
            }
        }
        build_rows(lines, |_, text| Ok::<_, Infallible>(escape(text)))
            .unwrap_or_else(|never| match never {})
    }

    fn highlighted_rows(
        &self,
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<Vec<RowView>, HighlightError> {
        let assets = self.assets();
        let theme_name = options.html.theme.as_str();
        let theme = assets
            .themes
            .themes
            .get(theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme {
                theme: theme_name.to_owned(),
            })?;

        let original = options.original_file.as_ref();
        let modified = options.modified_file.as_ref();
        let original_syntax = find_syntax(&assets.syntaxes, original)
            .or_else(|| find_syntax(&assets.syntaxes, modified))
            .ok_or(HighlightError::NoSyntaxFound)?;
        let modified_syntax =
            find_syntax(&assets.syntaxes, modified).unwrap_or(original_syntax);

        let mut original_lines = HighlightLines::new(original_syntax, theme);
        let mut modified_lines = HighlightLines::new(modified_syntax, theme);
        let syntaxes = &assets.syntaxes;

        build_rows(lines, |side, text| -> Result<String, HighlightError> {
            let ranges = match side {
                Side::Original => original_lines.highlight_line(text, syntaxes)?,
                Side::Modified => modified_lines.highlight_line(text, syntaxes)?,
                Side::Both => {
                    original_lines.highlight_line(text, syntaxes)?;
                    modified_lines.highlight_line(text, syntaxes)?
                }
            };
            Ok(styled_line_to_highlighted_html(&ranges, IncludeBackground::No)?)
        })
    }
}

impl Renderer for HtmlRenderer {
    fn render(
        &self,
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<ExportContent, ExportError> {
        let env = template_environment()?;
        let rows = self.rows(lines, options);
        let title = options.resolved_title();

        if options.html.svg {
            let (width, height) = svg_dimensions(lines, rows.len(), options.html.svg_min_width);
            let svg = render_template(
                &env,
                SVG_TEMPLATE,
                context! {
                    title => title,
                    rows => rows,
                    width => width,
                    height => height,
                    show_line_numbers => options.html.show_line_numbers,
                    inline_styles => options.html.inline_styles,
                },
            )?;
            return Ok(ExportContent::Binary(Artifact::new(
                svg.into_bytes(),
                SVG_MIME_TYPE,
            )));
        }

        let document = render_template(
            &env,
            DOCUMENT_TEMPLATE,
            context! {
                title => title,
                original_name => options.original_name(),
                modified_name => options.modified_name(),
                rows => rows,
                show_line_numbers => options.html.show_line_numbers,
                inline_styles => options.html.inline_styles,
            },
        )?;
        Ok(ExportContent::Text(document))
    }

    fn mime_type(&self) -> &'static str {
        "text/html"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}

/// One table row as the templates see it.
#[derive(Debug, Clone, Serialize)]
struct RowView {
    classes: &'static str,
    marker: char,
    original_number: String,
    modified_number: String,
    /// Already-escaped (or highlighted) markup.
    content: String,
}

/// Which highlighter a cell's text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Original,
    Modified,
    Both,
}

/// Builds table rows, formatting each cell's text with `cell`. A modified
/// record yields a removed-style row followed by an added-style row.
fn build_rows<E>(
    lines: &[DiffLine],
    mut cell: impl FnMut(Side, &str) -> Result<String, E>,
) -> Result<Vec<RowView>, E> {
    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let original_text = line.original_text().unwrap_or_default();
        let modified_text = line.modified_text().unwrap_or_default();
        match line.kind {
            DiffLineKind::Unchanged => rows.push(RowView {
                classes: "line-unchanged",
                marker: DiffLineKind::Unchanged.marker(),
                original_number: number(line.original_line_number),
                modified_number: number(line.modified_line_number),
                content: cell(Side::Both, modified_text)?,
            }),
            DiffLineKind::Added => rows.push(RowView {
                classes: "line-added",
                marker: DiffLineKind::Added.marker(),
                original_number: String::new(),
                modified_number: number(line.modified_line_number),
                content: cell(Side::Modified, modified_text)?,
            }),
            DiffLineKind::Removed => rows.push(RowView {
                classes: "line-removed",
                marker: DiffLineKind::Removed.marker(),
                original_number: number(line.original_line_number),
                modified_number: String::new(),
                content: cell(Side::Original, original_text)?,
            }),
            DiffLineKind::Modified => {
                rows.push(RowView {
                    classes: "line-modified line-removed",
                    marker: DiffLineKind::Removed.marker(),
                    original_number: number(line.original_line_number),
                    modified_number: String::new(),
                    content: cell(Side::Original, original_text)?,
                });
                rows.push(RowView {
                    classes: "line-modified line-added",
                    marker: DiffLineKind::Added.marker(),
                    original_number: String::new(),
                    modified_number: number(line.modified_line_number),
                    content: cell(Side::Modified, modified_text)?,
                });
            }
        }
    }
    Ok(rows)
}

fn number(line_number: Option<u32>) -> String {
    line_number.map_or_else(String::new, |n| n.to_string())
}

fn escape(text: &str) -> String {
    HtmlEscape(text).to_string()
}

/// Finds a syntax from the file's declared language, then its extension.
fn find_syntax<'s>(
    syntaxes: &'s SyntaxSet,
    file: Option<&FileInfo>,
) -> Option<&'s SyntaxReference> {
    let file = file?;
    file.language
        .as_deref()
        .and_then(|language| syntaxes.find_syntax_by_token(language))
        .or_else(|| {
            Utf8Path::new(&file.name)
                .extension()
                .and_then(|ext| syntaxes.find_syntax_by_extension(ext))
        })
}

/// Returns the SVG canvas size for `row_count` rendered rows.
fn svg_dimensions(lines: &[DiffLine], row_count: usize, min_width: u32) -> (u32, u32) {
    use svg_metrics::{CHAR_WIDTH, GUTTER_WIDTH, HEADER_HEIGHT, PADDING, ROW_HEIGHT};

    let widest_columns = lines
        .iter()
        .flat_map(|line| [line.original_text(), line.modified_text()])
        .flatten()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let widest = u32::try_from(widest_columns).unwrap_or(u32::MAX);
    let content_width = widest
        .saturating_mul(CHAR_WIDTH)
        .saturating_add(GUTTER_WIDTH)
        .saturating_add(PADDING.saturating_mul(2));

    let rows = u32::try_from(row_count.max(1)).unwrap_or(u32::MAX);
    let height = rows
        .saturating_mul(ROW_HEIGHT)
        .saturating_add(HEADER_HEIGHT)
        .saturating_add(PADDING);

    (content_width.max(min_width), height)
}

fn template_environment() -> Result<Environment<'static>, ExportError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .map_err(|e| ExportError::Render {
                message: format!("invalid template '{name}': {e}"),
            })?;
    }
    Ok(env)
}

fn render_template(
    env: &Environment<'_>,
    name: &str,
    ctx: minijinja::Value,
) -> Result<String, ExportError> {
    let template = env.get_template(name).map_err(|e| ExportError::Render {
        message: format!("failed to retrieve template '{name}': {e}"),
    })?;
    template.render(ctx).map_err(|e| ExportError::Render {
        message: format!("template rendering failed: {e}"),
    })
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
