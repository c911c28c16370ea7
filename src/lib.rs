//! Diffexport library crate for rendering line-level diffs into shareable
//! documents.
//!
//! The library takes diff records produced elsewhere, renders them as HTML
//! (optionally as SVG), plain text or Markdown, and hands the result to a
//! delivery sink that saves it to disk or opens it in a browser.

pub mod config;
pub mod delivery;
pub mod diff;
pub mod export;

pub use config::{DiffExportConfig, OperationMode};
pub use delivery::{BrowserPreviewSink, DeliveryError, DeliverySink, FsDeliverySink, PreviewSurface};
pub use diff::{DiffDocument, DiffLine, DiffLineKind, FileInfo};
pub use export::{
    DiffExporter, ExportContent, ExportError, ExportFormat, ExportOptions, ExportResult,
    RendererRegistry,
};
