//! Export results returned to callers.

use super::format::ExportFormat;

/// A packaged binary payload tagged with its own media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    mime_type: String,
}

impl Artifact {
    /// Creates an artifact from raw bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Returns the artifact payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the artifact's media type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Consumes the artifact and returns its payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Content produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportContent {
    /// Text document.
    Text(String),
    /// Pre-packaged binary payload.
    Binary(Artifact),
}

impl ExportContent {
    /// Returns the text if this is textual content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    /// Returns the raw bytes regardless of variant.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(artifact) => artifact.bytes(),
        }
    }

    /// Normalises the content into an [`Artifact`].
    ///
    /// Text is UTF-8 encoded and tagged with `mime_type`; binary artifacts
    /// keep the media type they were built with.
    #[must_use]
    pub fn into_artifact(self, mime_type: &str) -> Artifact {
        match self {
            Self::Text(text) => Artifact::new(text.into_bytes(), mime_type),
            Self::Binary(artifact) => artifact,
        }
    }
}

/// The envelope returned by a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Rendered content.
    pub content: ExportContent,
    /// Media type declared by the renderer for the format.
    pub mime_type: &'static str,
    /// Resolved, non-empty filename.
    pub filename: String,
    /// Format that was requested.
    pub format: ExportFormat,
}
