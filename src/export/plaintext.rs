//! Plain text renderer.
//!
//! Produces unified-diff style text: a short header naming both files, then
//! one line per record prefixed with ` `, `+` or `-`. A modified record
//! becomes a `-` line followed by a `+` line.

use crate::diff::{DiffLine, DiffLineKind};

use super::error::ExportError;
use super::model::ExportContent;
use super::options::ExportOptions;
use super::renderer::Renderer;

/// Placeholder body for an empty diff.
pub const EMPTY_BODY: &str = "(no differences)";

/// Renders diffs as unified-style plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextRenderer;

impl Renderer for PlaintextRenderer {
    fn render(
        &self,
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<ExportContent, ExportError> {
        let settings = &options.plaintext;
        let mut out = Vec::with_capacity(lines.len().saturating_add(5));

        if settings.include_header {
            out.push(options.resolved_title());
            out.push(format!("--- {}", options.original_name().unwrap_or("original")));
            out.push(format!("+++ {}", options.modified_name().unwrap_or("modified")));
            out.push(String::new());
        }

        if lines.is_empty() {
            out.push(EMPTY_BODY.to_owned());
        } else {
            out.extend(diff_body(lines, settings.show_line_numbers));
        }

        let mut text = out.join("\n");
        text.push('\n');
        Ok(ExportContent::Text(text))
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

/// Formats `lines` as marker-prefixed rows, optionally behind a gutter of
/// original and modified line numbers.
pub(super) fn diff_body(lines: &[DiffLine], show_line_numbers: bool) -> Vec<String> {
    let gutter = show_line_numbers.then(|| Gutter::for_lines(lines));
    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        push_line(&mut rows, line, gutter.as_ref());
    }
    rows
}

/// Line-number columns sized to the widest number in the diff.
struct Gutter {
    width: usize,
}

impl Gutter {
    fn for_lines(lines: &[DiffLine]) -> Self {
        let widest = lines
            .iter()
            .flat_map(|line| [line.original_line_number, line.modified_line_number])
            .flatten()
            .max()
            .unwrap_or(0);
        Self {
            width: widest.to_string().len(),
        }
    }

    fn format(&self, original: Option<u32>, modified: Option<u32>) -> String {
        let width = self.width;
        format!(
            "{:>width$} {:>width$} ",
            number_or_blank(original),
            number_or_blank(modified)
        )
    }
}

fn number_or_blank(number: Option<u32>) -> String {
    number.map_or_else(String::new, |n| n.to_string())
}

fn push_line(out: &mut Vec<String>, line: &DiffLine, gutter: Option<&Gutter>) {
    let prefix = |original: Option<u32>, modified: Option<u32>| {
        gutter.map_or_else(String::new, |g| g.format(original, modified))
    };
    let original_text = line.original_text().unwrap_or_default();
    let modified_text = line.modified_text().unwrap_or_default();

    match line.kind {
        DiffLineKind::Unchanged => out.push(format!(
            "{} {modified_text}",
            prefix(line.original_line_number, line.modified_line_number)
        )),
        DiffLineKind::Added => out.push(format!(
            "{}+{modified_text}",
            prefix(None, line.modified_line_number)
        )),
        DiffLineKind::Removed => out.push(format!(
            "{}-{original_text}",
            prefix(line.original_line_number, None)
        )),
        DiffLineKind::Modified => {
            out.push(format!(
                "{}-{original_text}",
                prefix(line.original_line_number, None)
            ));
            out.push(format!(
                "{}+{modified_text}",
                prefix(None, line.modified_line_number)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::diff::FileInfo;
    use crate::export::PlaintextOptions;
    use crate::export::test_helpers::{
        assert_contains, assert_not_contains, sample_lines, sample_options, test_data,
    };

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn render_to_string(
        lines: &[DiffLine],
        options: &ExportOptions,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let content = PlaintextRenderer.render(lines, options)?;
        Ok(content.as_text().ok_or("plaintext is text")?.to_owned())
    }

    #[rstest]
    fn writes_header_with_file_names() -> TestResult {
        let output = render_to_string(&[], &sample_options())?;

        assert_contains(&output, &format!("--- {}", test_data::ORIGINAL_NAME))?;
        assert_contains(&output, &format!("+++ {}", test_data::MODIFIED_NAME))?;
        Ok(())
    }

    #[rstest]
    fn empty_diff_is_header_plus_placeholder() -> TestResult {
        let output = render_to_string(&[], &ExportOptions::default())?;

        assert_eq!(
            output,
            "Diff Export\n--- original\n+++ modified\n\n(no differences)\n"
        );
        Ok(())
    }

    #[rstest]
    fn renders_markers_without_line_numbers() -> TestResult {
        let options = ExportOptions {
            plaintext: PlaintextOptions {
                show_line_numbers: false,
                include_header: false,
            },
            ..Default::default()
        };

        let output = render_to_string(&sample_lines(), &options)?;

        assert_eq!(
            output,
            concat!(
                " fn main() {\n",
                "-let retries = 3;\n",
                "+let retries = 5;\n",
                "-    run(retries);\n",
                "+    run_with(retries);\n",
                " }\n"
            )
        );
        Ok(())
    }

    #[rstest]
    fn aligns_line_number_columns() -> TestResult {
        let lines = vec![
            DiffLine::unchanged(9, 9, "a"),
            DiffLine::removed(10, "b"),
            DiffLine::added(10, "c"),
        ];
        let options = ExportOptions {
            plaintext: PlaintextOptions {
                include_header: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let output = render_to_string(&lines, &options)?;

        assert_eq!(output, " 9  9  a\n10    -b\n   10 +c\n");
        Ok(())
    }

    #[rstest]
    fn title_override_replaces_derived_title() -> TestResult {
        let options = ExportOptions {
            title: Some("Nightly drift".to_owned()),
            modified_file: Some(FileInfo::named("b.txt")),
            ..Default::default()
        };

        let output = render_to_string(&[], &options)?;

        assert!(output.starts_with("Nightly drift\n"));
        assert_not_contains(&output, "Diff: b.txt")?;
        Ok(())
    }

    #[rstest]
    fn preserves_line_order() -> TestResult {
        let output = render_to_string(&sample_lines(), &ExportOptions::default())?;

        let removed = output.find(test_data::REMOVED_TEXT).ok_or("removed line")?;
        let added = output.find(test_data::ADDED_TEXT).ok_or("added line")?;
        assert!(removed < added);
        Ok(())
    }
}
