//! Diff export: renderers, the format registry and the exporter.
//!
//! A caller hands the exporter an ordered slice of [`DiffLine`] records, an
//! [`ExportFormat`] and [`ExportOptions`]. The exporter looks the format up
//! in a [`RendererRegistry`], renders, and either returns an
//! [`ExportResult`] or passes it to a [`DeliverySink`] as a file save or a
//! preview.
//!
//! # Supported Formats
//!
//! - **HTML** (`html`): standalone document, optionally syntax highlighted
//!   or wrapped in SVG
//! - **Plain text** (`plaintext`): unified-diff style text
//! - **Markdown** (`markdown`): document with a fenced `diff` block
//!
//! Rendering is deterministic: the same input always produces the same
//! bytes.
//!
//! [`DiffLine`]: crate::diff::DiffLine
//! [`DeliverySink`]: crate::delivery::DeliverySink

mod error;
mod exporter;
mod format;
mod html;
mod markdown;
mod model;
mod options;
mod plaintext;
mod registry;
mod renderer;
#[doc(hidden)]
pub mod test_helpers;

pub use error::ExportError;
pub use exporter::{
    DiffExporter, PREVIEW_TITLE, export, export_and_download, export_html_and_preview,
    generate_filename, is_format_supported, list_supported_formats,
};
pub use format::ExportFormat;
pub use html::{HtmlRenderer, SVG_MIME_TYPE};
pub use markdown::MarkdownRenderer;
pub use model::{Artifact, ExportContent, ExportResult};
pub use options::{
    DEFAULT_THEME, DEFAULT_TITLE, ExportOptions, HtmlOptions, MarkdownOptions, PlaintextOptions,
};
pub use plaintext::PlaintextRenderer;
pub use registry::{RendererRegistry, default_registry};
pub use renderer::{Renderer, derive_filename};
