//! Loading the diff document named by the configuration.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use diffexport::{DiffDocument, DiffExportConfig, DiffLine, ExportError, ExportOptions};

/// Diff lines and the options to render them with.
#[derive(Debug, Clone)]
pub struct PreparedExport {
    /// Diff records in file order.
    pub lines: Vec<DiffLine>,
    /// Options built from the configuration and document metadata.
    pub options: ExportOptions,
}

/// Reads the configured input and combines it with the configured options.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the input cannot be read, or
/// [`ExportError::InvalidInput`] when it is not a diff document.
pub fn prepare(config: &DiffExportConfig) -> Result<PreparedExport, ExportError> {
    let text = match config.input_path() {
        Some(path) => read_input_file(Utf8Path::new(path))?,
        None => read_input(&mut io::stdin().lock())?,
    };
    let document = DiffDocument::from_json(&text)?;
    tracing::debug!("loaded {} diff lines", document.lines.len());

    Ok(PreparedExport {
        options: config.export_options(document.original_file, document.modified_file),
        lines: document.lines,
    })
}

/// Reads a UTF-8 input file relative to the current directory.
pub fn read_input_file(path: &Utf8Path) -> Result<String, ExportError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| ExportError::Io {
        message: format!("invalid input path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        ExportError::Io {
            message: format!("failed to open input directory '{parent}': {error}"),
        }
    })?;
    dir.read_to_string(file_name)
        .map_err(|error| ExportError::Io {
            message: format!("failed to read input '{path}': {error}"),
        })
}

/// Reads all of `reader` as UTF-8 text.
pub fn read_input<R: Read>(reader: &mut R) -> Result<String, ExportError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|error| ExportError::Io {
            message: format!("failed to read diff from standard input: {error}"),
        })?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const DOCUMENT: &str = r#"{
        "original_file": {"name": "a.rs"},
        "lines": [{"kind":"removed","original_line_number":1,"original_content":"x"}]
    }"#;

    #[rstest]
    fn reads_input_file_by_path() -> TestResult {
        let temp = tempfile::tempdir()?;
        let path = Utf8PathBuf::from_path_buf(temp.path().join("diff.json"))
            .map_err(|_| "temp path should be UTF-8")?;
        std::fs::write(&path, DOCUMENT)?;

        assert_eq!(read_input_file(&path)?, DOCUMENT);
        Ok(())
    }

    #[rstest]
    fn missing_input_file_is_an_io_error() -> TestResult {
        let temp = tempfile::tempdir()?;
        let path = Utf8PathBuf::from_path_buf(temp.path().join("absent.json"))
            .map_err(|_| "temp path should be UTF-8")?;

        let err = read_input_file(&path).expect_err("file does not exist");

        assert!(matches!(err, ExportError::Io { ref message } if message.contains("absent.json")));
        Ok(())
    }

    #[rstest]
    fn reads_reader_to_string() -> TestResult {
        let mut reader = Cursor::new(DOCUMENT.as_bytes());

        assert_eq!(read_input(&mut reader)?, DOCUMENT);
        Ok(())
    }

    #[rstest]
    fn prepare_merges_document_names_with_config() -> TestResult {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("diff.json");
        std::fs::write(&path, DOCUMENT)?;
        let config = DiffExportConfig {
            input: Some(path.to_str().ok_or("temp path should be UTF-8")?.to_owned()),
            modified_name: Some("b.rs".to_owned()),
            ..Default::default()
        };

        let prepared = prepare(&config)?;

        assert_eq!(prepared.lines, vec![DiffLine::removed(1, "x")]);
        assert_eq!(prepared.options.original_name(), Some("a.rs"));
        assert_eq!(prepared.options.modified_name(), Some("b.rs"));
        Ok(())
    }
}
