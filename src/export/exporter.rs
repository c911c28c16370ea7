//! Export orchestration: renderer lookup, result assembly and delivery.

use crate::delivery::{DeliveryError, DeliverySink, PreviewSurface};
use crate::diff::{DiffLine, FileInfo};

use super::error::ExportError;
use super::format::ExportFormat;
use super::model::{ExportContent, ExportResult};
use super::options::ExportOptions;
use super::registry::{RendererRegistry, default_registry};

/// Title given to every preview surface.
pub const PREVIEW_TITLE: &str = "Diff Preview";

/// Runs exports against a renderer registry.
///
/// Every operation is a single synchronous call that either completes or
/// fails as a whole. The exporter holds no state beyond the registry
/// reference, so it is cheap to copy and safe to share.
#[derive(Debug, Clone, Copy)]
pub struct DiffExporter<'r> {
    registry: &'r RendererRegistry,
}

impl Default for DiffExporter<'static> {
    fn default() -> Self {
        Self::new(default_registry())
    }
}

impl<'r> DiffExporter<'r> {
    /// Creates an exporter backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'r RendererRegistry) -> Self {
        Self { registry }
    }

    /// Renders `lines` in `format` and wraps the content with its media type
    /// and filename.
    ///
    /// The filename is `options.filename` when it is non-empty, otherwise the
    /// renderer's default derived from `options.original_file` and
    /// `options.modified_file`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] when `format` is not
    /// registered, or [`ExportError::Render`] when the renderer fails.
    pub fn export(
        &self,
        lines: &[DiffLine],
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<ExportResult, ExportError> {
        let renderer = self.registry.resolve(format)?;
        let content = renderer.render(lines, options)?;
        let mime_type = renderer.mime_type();
        let filename = options.filename_override().map_or_else(
            || {
                renderer.generate_filename(
                    options.original_file.as_ref(),
                    options.modified_file.as_ref(),
                )
            },
            ToOwned::to_owned,
        );

        tracing::debug!(
            "exported {} diff lines as {format} ({} bytes) to '{filename}'",
            lines.len(),
            content.as_bytes().len()
        );
        Ok(ExportResult {
            content,
            mime_type,
            filename,
            format,
        })
    }

    /// Exports and hands the result to `sink` as a single file save.
    ///
    /// Text content is encoded as UTF-8 and tagged with the format's media
    /// type; binary artifacts are saved as they are.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::export`], or
    /// [`ExportError::DeliveryFailed`] when the sink cannot save the file.
    pub fn export_and_download(
        &self,
        sink: &dyn DeliverySink,
        lines: &[DiffLine],
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<(), ExportError> {
        let result = self.export(lines, format, options)?;
        let artifact = result.content.into_artifact(result.mime_type);

        sink.save_file(&artifact, &result.filename)
            .map_err(|error| {
                tracing::error!("failed to save export '{}': {error}", result.filename);
                ExportError::DeliveryFailed {
                    message: error.to_string(),
                }
            })
    }

    /// Exports as HTML and shows the markup on a preview surface titled
    /// [`PREVIEW_TITLE`].
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::export`],
    /// [`ExportError::InvalidContentType`] when the HTML renderer returns
    /// binary content (for instance with `html.svg` set), or
    /// [`ExportError::PreviewUnavailable`] when the sink cannot provide or
    /// write to a surface.
    pub fn export_html_and_preview(
        &self,
        sink: &dyn DeliverySink,
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<(), ExportError> {
        let result = self.export(lines, ExportFormat::Html, options)?;
        let markup = match result.content {
            ExportContent::Text(markup) => markup,
            ExportContent::Binary(artifact) => {
                tracing::error!(
                    "cannot preview {} content: expected HTML markup",
                    artifact.mime_type()
                );
                return Err(ExportError::InvalidContentType {
                    format: result.format.to_string(),
                    mime_type: artifact.mime_type().to_owned(),
                });
            }
        };

        let mut surface = sink
            .open_surface()
            .map_err(|error| preview_unavailable("could not open preview surface", &error))?;
        write_preview(surface.as_mut(), &markup)
            .map_err(|error| preview_unavailable("could not write preview", &error))
    }

    /// Returns the default filename `format`'s renderer derives from the
    /// given file metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] when `format` is not
    /// registered.
    pub fn generate_filename(
        &self,
        original: Option<&FileInfo>,
        modified: Option<&FileInfo>,
        format: ExportFormat,
    ) -> Result<String, ExportError> {
        let renderer = self.registry.resolve(format)?;
        Ok(renderer.generate_filename(original, modified))
    }

    /// Reports whether `candidate` is exactly a registered format key.
    #[must_use]
    pub fn is_format_supported(&self, candidate: &str) -> bool {
        self.registry.is_format_supported(candidate)
    }

    /// Returns the registered formats in registration order.
    #[must_use]
    pub fn list_supported_formats(&self) -> Vec<ExportFormat> {
        self.registry.list_supported_formats()
    }
}

fn write_preview(surface: &mut dyn PreviewSurface, markup: &str) -> Result<(), DeliveryError> {
    surface.write_markup(markup)?;
    surface.set_title(PREVIEW_TITLE)?;
    surface.close()
}

fn preview_unavailable(context: &str, error: &DeliveryError) -> ExportError {
    tracing::error!("{context}: {error}");
    ExportError::PreviewUnavailable {
        message: format!("{context}: {error}"),
    }
}

/// Exports with the default registry. See [`DiffExporter::export`].
///
/// # Errors
///
/// See [`DiffExporter::export`].
pub fn export(
    lines: &[DiffLine],
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<ExportResult, ExportError> {
    DiffExporter::default().export(lines, format, options)
}

/// Exports and saves with the default registry. See
/// [`DiffExporter::export_and_download`].
///
/// # Errors
///
/// See [`DiffExporter::export_and_download`].
pub fn export_and_download(
    sink: &dyn DeliverySink,
    lines: &[DiffLine],
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    DiffExporter::default().export_and_download(sink, lines, format, options)
}

/// Exports HTML and previews it with the default registry. See
/// [`DiffExporter::export_html_and_preview`].
///
/// # Errors
///
/// See [`DiffExporter::export_html_and_preview`].
pub fn export_html_and_preview(
    sink: &dyn DeliverySink,
    lines: &[DiffLine],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    DiffExporter::default().export_html_and_preview(sink, lines, options)
}

/// Derives a default filename with the default registry. Pass
/// [`ExportFormat::default()`] for HTML.
///
/// # Errors
///
/// See [`DiffExporter::generate_filename`].
pub fn generate_filename(
    original: Option<&FileInfo>,
    modified: Option<&FileInfo>,
    format: ExportFormat,
) -> Result<String, ExportError> {
    DiffExporter::default().generate_filename(original, modified, format)
}

/// Reports whether `candidate` is a supported format key in the default
/// registry.
#[must_use]
pub fn is_format_supported(candidate: &str) -> bool {
    default_registry().is_format_supported(candidate)
}

/// Lists the default registry's formats in registration order.
#[must_use]
pub fn list_supported_formats() -> Vec<ExportFormat> {
    default_registry().list_supported_formats()
}

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;
