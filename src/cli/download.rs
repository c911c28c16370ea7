//! Renders the diff and saves it into the configured directory.

use std::io;

use diffexport::{
    DiffExportConfig, DiffExporter, ExportError, ExportFormat, ExportOptions, FsDeliverySink,
};

use super::input::prepare;
use super::output::write_status;

/// Exports in the configured format and saves the file.
pub fn run(config: &DiffExportConfig) -> Result<(), ExportError> {
    let output_dir = config
        .output_dir
        .as_deref()
        .ok_or_else(|| ExportError::Configuration {
            message: "output directory is required (use --output-dir or -o)".to_owned(),
        })?;
    let format = config.export_format()?;
    let mut prepared = prepare(config)?;

    let exporter = DiffExporter::default();
    let filename = resolve_filename(&exporter, format, &prepared.options)?;
    prepared.options.filename = Some(filename.clone());

    let sink = FsDeliverySink::new(output_dir);
    exporter.export_and_download(&sink, &prepared.lines, format, &prepared.options)?;

    let saved = sink.output_dir().join(&filename);
    tracing::info!("saved {format} export to '{saved}'");
    write_status(&mut io::stdout().lock(), &format!("Saved {saved}"))
}

/// Returns the filename the export will be saved under.
///
/// SVG renderings keep the HTML renderer's stem but take an `.svg`
/// extension, unless the caller supplied a name.
fn resolve_filename(
    exporter: &DiffExporter<'_>,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    if let Some(name) = options.filename_override() {
        return Ok(name.to_owned());
    }
    let derived = exporter.generate_filename(
        options.original_file.as_ref(),
        options.modified_file.as_ref(),
        format,
    )?;
    if format == ExportFormat::Html && options.html.svg {
        Ok(svg_filename(&derived))
    } else {
        Ok(derived)
    }
}

fn svg_filename(html_name: &str) -> String {
    let stem = html_name.strip_suffix(".html").unwrap_or(html_name);
    format!("{stem}.svg")
}

#[cfg(test)]
mod tests {
    use diffexport::FileInfo;
    use diffexport::export::HtmlOptions;
    use rstest::rstest;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn options(svg: bool, filename: Option<&str>) -> ExportOptions {
        ExportOptions {
            filename: filename.map(str::to_owned),
            original_file: Some(FileInfo::named("a.rs")),
            modified_file: Some(FileInfo::named("b.rs")),
            html: HtmlOptions {
                svg,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[rstest]
    #[case(ExportFormat::Html, false, None, "a-vs-b-diff.html")]
    #[case(ExportFormat::Html, true, None, "a-vs-b-diff.svg")]
    #[case(ExportFormat::Markdown, true, None, "a-vs-b-diff.md")]
    #[case(ExportFormat::Html, true, Some("chosen.html"), "chosen.html")]
    fn resolves_filename(
        #[case] format: ExportFormat,
        #[case] svg: bool,
        #[case] filename: Option<&str>,
        #[case] expected: &str,
    ) -> TestResult {
        let name = resolve_filename(&DiffExporter::default(), format, &options(svg, filename))?;

        assert_eq!(name, expected);
        Ok(())
    }

    #[rstest]
    fn run_saves_into_output_dir() -> TestResult {
        let temp = tempfile::tempdir()?;
        let input = temp.path().join("diff.json");
        std::fs::write(
            &input,
            r#"[{"kind":"added","modified_line_number":1,"modified_content":"hello"}]"#,
        )?;
        let out = temp.path().join("out");
        let config = DiffExportConfig {
            input: Some(input.to_str().ok_or("temp path should be UTF-8")?.to_owned()),
            output_dir: Some(out.to_str().ok_or("temp path should be UTF-8")?.to_owned()),
            format: "plaintext".to_owned(),
            ..Default::default()
        };

        run(&config)?;

        let saved = std::fs::read_to_string(out.join("diff-export.txt"))?;
        assert!(saved.contains("+hello"), "unexpected export: {saved}");
        Ok(())
    }
}
