//! Export format identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ExportError;

/// Supported export formats.
///
/// Keys parse by exact match: `"HTML"` or `"md"` are not format keys.
/// Vector-graphics output is a mode of [`ExportFormat::Html`] (see
/// [`HtmlOptions::svg`](super::HtmlOptions::svg)), not a separate format.
/// The default format is [`ExportFormat::Html`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML document with styled diff rows.
    #[default]
    Html,
    /// Unified-style plain text.
    Plaintext,
    /// Markdown with a fenced `diff` block.
    Markdown,
}

impl ExportFormat {
    /// Every format known to the crate, in canonical order.
    pub const ALL: [Self; 3] = [Self::Html, Self::Plaintext, Self::Markdown];

    /// Returns the registry key for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Plaintext => "plaintext",
            Self::Markdown => "markdown",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ExportError::unsupported(s))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("html", ExportFormat::Html)]
    #[case("plaintext", ExportFormat::Plaintext)]
    #[case("markdown", ExportFormat::Markdown)]
    fn parses_exact_keys(
        #[case] input: &str,
        #[case] expected: ExportFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let parsed: ExportFormat = input.parse()?;
        if parsed != expected {
            return Err(format!("expected {expected:?}, got {parsed:?}").into());
        }
        Ok(())
    }

    #[rstest]
    #[case("HTML")]
    #[case("Markdown")]
    #[case("md")]
    #[case("svg")]
    #[case("bogus")]
    #[case("")]
    #[case(" html")]
    fn rejects_anything_but_exact_keys(#[case] input: &str) {
        let err = input
            .parse::<ExportFormat>()
            .expect_err("should reject non-key");
        assert_eq!(err, ExportError::unsupported(input));
    }

    #[rstest]
    fn display_matches_key() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string(), format.as_str());
        }
    }
}
