//! Error types exposed by the export layer.

use thiserror::Error;

/// Errors surfaced while exporting diff lines or delivering the result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The requested format has no registered renderer.
    #[error("unsupported export format '{format}'")]
    UnsupportedFormat {
        /// The format key the caller asked for.
        format: String,
    },

    /// The delivery sink could not save the exported artifact.
    #[error("failed to deliver export: {message}")]
    DeliveryFailed {
        /// Error detail reported by the sink.
        message: String,
    },

    /// The delivery sink could not provide a preview surface.
    #[error("preview unavailable: {message}")]
    PreviewUnavailable {
        /// Error detail reported by the sink.
        message: String,
    },

    /// A renderer returned binary content where markup text was required.
    #[error("renderer for '{format}' returned non-text content ({mime_type}); preview needs markup")]
    InvalidContentType {
        /// Format whose renderer produced the content.
        format: String,
        /// Media type of the binary artifact that was returned.
        mime_type: String,
    },

    /// A renderer failed while producing content.
    #[error("rendering failed: {message}")]
    Render {
        /// Error detail from the renderer.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The diff document supplied by the caller could not be read.
    #[error("invalid diff input: {message}")]
    InvalidInput {
        /// Details about the malformed input.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ExportError {
    /// Builds an [`ExportError::UnsupportedFormat`] for the given key.
    #[must_use]
    pub fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
