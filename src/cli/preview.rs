//! Renders the diff as HTML and opens it in a browser.

use diffexport::{BrowserPreviewSink, DiffExportConfig, DiffExporter, ExportError};

use super::input::prepare;

/// Previews the HTML rendering, then waits for the temporary file to be
/// released before returning.
pub fn run(config: &DiffExportConfig) -> Result<(), ExportError> {
    let prepared = prepare(config)?;
    let sink = BrowserPreviewSink::new(config.preview_app.clone()).map_err(|error| {
        ExportError::PreviewUnavailable {
            message: error.to_string(),
        }
    })?;

    let outcome =
        DiffExporter::default().export_html_and_preview(&sink, &prepared.lines, &prepared.options);
    sink.wait_for_cleanup();
    outcome
}
