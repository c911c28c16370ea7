//! Renders the diff and writes the document to standard output.

use std::io;

use diffexport::{DiffExportConfig, DiffExporter, ExportError};

use super::input::prepare;
use super::output::write_content;

/// Exports in the configured format and prints the content.
pub fn run(config: &DiffExportConfig) -> Result<(), ExportError> {
    let format = config.export_format()?;
    let prepared = prepare(config)?;

    let result = DiffExporter::default().export(&prepared.lines, format, &prepared.options)?;
    write_content(&mut io::stdout().lock(), &result.content)
}
