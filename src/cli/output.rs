//! Output formatting utilities for CLI operations.

use std::io::Write;

use diffexport::{ExportContent, ExportError, ExportFormat};

/// Writes one format key per line.
pub fn write_formats<W: Write>(writer: &mut W, formats: &[ExportFormat]) -> Result<(), ExportError> {
    for format in formats {
        writeln!(writer, "{format}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes rendered content unchanged.
pub fn write_content<W: Write>(writer: &mut W, content: &ExportContent) -> Result<(), ExportError> {
    writer.write_all(content.as_bytes()).map_err(|e| io_error(&e))?;
    writer.flush().map_err(|e| io_error(&e))
}

/// Writes a one-line status message.
pub fn write_status<W: Write>(writer: &mut W, message: &str) -> Result<(), ExportError> {
    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`ExportError::Io`].
fn io_error(error: &std::io::Error) -> ExportError {
    ExportError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use diffexport::export::Artifact;
    use rstest::rstest;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[rstest]
    fn writes_formats_in_order() -> TestResult {
        let mut buffer = Vec::new();

        write_formats(&mut buffer, &ExportFormat::ALL)?;

        assert_eq!(String::from_utf8(buffer)?, "html\nplaintext\nmarkdown\n");
        Ok(())
    }

    #[rstest]
    #[case(ExportContent::Text("# diff\n".to_owned()), b"# diff\n".as_slice())]
    #[case(
        ExportContent::Binary(Artifact::new(b"<svg/>".to_vec(), "image/svg+xml")),
        b"<svg/>".as_slice()
    )]
    fn writes_content_bytes_verbatim(
        #[case] content: ExportContent,
        #[case] expected: &[u8],
    ) -> TestResult {
        let mut buffer = Vec::new();

        write_content(&mut buffer, &content)?;

        assert_eq!(buffer, expected);
        Ok(())
    }
}
