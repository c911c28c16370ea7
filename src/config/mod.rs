//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.diffexport.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `DIFFEXPORT_FORMAT`,
//!    `DIFFEXPORT_OUTPUT_DIR`, and so on
//! 4. **Command-line arguments** – `--format`/`-f`, `--output-dir`/`-o`, ...
//!
//! # Configuration File
//!
//! ```toml
//! format = "markdown"
//! output_dir = "exports"
//! highlight = true
//! preview_app = "firefox"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::diff::FileInfo;
use crate::export::{ExportError, ExportFormat, ExportOptions, HtmlOptions};

/// What the binary does with a loaded diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Print the supported format keys and exit.
    ListFormats,
    /// Render HTML and open it in a browser.
    Preview,
    /// Render and save into `output_dir`.
    Download,
    /// Render and write the document to standard output.
    Print,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use diffexport::DiffExportConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DiffExportConfig::load().expect("failed to load configuration");
/// let format = config.export_format().expect("format should be supported");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "DIFFEXPORT",
    discovery(
        dotfile_name = ".diffexport.toml",
        config_file_name = "diffexport.toml",
        app_name = "diffexport"
    )
)]
pub struct DiffExportConfig {
    /// Path of the JSON diff document; standard input when unset or `-`.
    ///
    /// Can be provided via:
    /// - CLI: `--input <PATH>` or `-i <PATH>`
    /// - Environment: `DIFFEXPORT_INPUT`
    #[ortho_config(cli_short = 'i')]
    pub input: Option<String>,

    /// Export format key: `html`, `plaintext` or `markdown`.
    ///
    /// Keys match exactly; `HTML` or `md` are rejected.
    #[ortho_config(cli_short = 'f')]
    pub format: String,

    /// Directory the export is saved into. Selects download mode.
    #[ortho_config(cli_short = 'o')]
    pub output_dir: Option<String>,

    /// Filename override for the saved export.
    #[ortho_config()]
    pub filename: Option<String>,

    /// Display name of the original file. Overrides the input document.
    #[ortho_config()]
    pub original_name: Option<String>,

    /// Display name of the modified file. Overrides the input document.
    #[ortho_config()]
    pub modified_name: Option<String>,

    /// Document title; derived from the file names when unset.
    #[ortho_config(cli_short = 't')]
    pub title: Option<String>,

    /// Opens the HTML rendering in a browser instead of saving it.
    ///
    /// Can be provided via:
    /// - CLI: `--preview` / `-p`
    /// - Config file: `preview = true`
    #[ortho_config(cli_short = 'p')]
    pub preview: bool,

    /// Lists the supported format keys and exits.
    #[ortho_config(cli_short = 'l')]
    pub list_formats: bool,

    /// Omits line-number columns from every format.
    #[ortho_config()]
    pub no_line_numbers: bool,

    /// Syntax-highlights HTML line content.
    #[ortho_config()]
    pub highlight: bool,

    /// Renders HTML as an SVG image.
    #[ortho_config()]
    pub svg: bool,

    /// Application used to open previews; the system default when unset.
    #[ortho_config()]
    pub preview_app: Option<String>,
}

/// Format used when none is configured.
pub const DEFAULT_FORMAT: &str = "html";

impl Default for DiffExportConfig {
    fn default() -> Self {
        Self {
            input: None,
            format: DEFAULT_FORMAT.to_owned(),
            output_dir: None,
            filename: None,
            original_name: None,
            modified_name: None,
            title: None,
            preview: false,
            list_formats: false,
            no_line_numbers: false,
            highlight: false,
            svg: false,
            preview_app: None,
        }
    }
}

impl DiffExportConfig {
    /// Determines the operation mode from the configured flags.
    ///
    /// `list_formats` wins over `preview`, which wins over `output_dir`.
    /// With none of them set the export is printed.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.list_formats {
            OperationMode::ListFormats
        } else if self.preview {
            OperationMode::Preview
        } else if self.output_dir.is_some() {
            OperationMode::Download
        } else {
            OperationMode::Print
        }
    }

    /// Parses the configured format key.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] when the key is not exactly
    /// one of the supported formats.
    pub fn export_format(&self) -> Result<ExportFormat, ExportError> {
        self.format.parse()
    }

    /// Returns the input path, or `None` when standard input should be read.
    #[must_use]
    pub fn input_path(&self) -> Option<&str> {
        self.input.as_deref().filter(|path| !path.is_empty() && *path != "-")
    }

    /// Builds export options from the configuration.
    ///
    /// `original_name` and `modified_name` replace the names of the files
    /// passed in, keeping their language.
    #[must_use]
    pub fn export_options(
        &self,
        original_file: Option<FileInfo>,
        modified_file: Option<FileInfo>,
    ) -> ExportOptions {
        let mut options = ExportOptions {
            filename: self.filename.clone(),
            original_file: override_name(original_file, self.original_name.as_deref()),
            modified_file: override_name(modified_file, self.modified_name.as_deref()),
            title: self.title.clone(),
            html: HtmlOptions {
                highlight: self.highlight,
                svg: self.svg,
                ..HtmlOptions::default()
            },
            ..ExportOptions::default()
        };
        if self.no_line_numbers {
            options.html.show_line_numbers = false;
            options.plaintext.show_line_numbers = false;
            options.markdown.show_line_numbers = false;
        }
        options
    }
}

fn override_name(file: Option<FileInfo>, name: Option<&str>) -> Option<FileInfo> {
    match (file, name) {
        (Some(file), Some(name)) => Some(FileInfo {
            name: name.to_owned(),
            ..file
        }),
        (None, Some(name)) => Some(FileInfo::named(name)),
        (file, None) => file,
    }
}

#[cfg(test)]
mod tests;
