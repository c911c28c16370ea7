//! Format-to-renderer registry.
//!
//! The process-wide registry is built on first use and never mutated
//! afterwards. Tests and embedders can build independent registries with
//! [`RendererRegistry::empty`] and [`RendererRegistry::with`].

use std::fmt;
use std::sync::LazyLock;

use super::error::ExportError;
use super::format::ExportFormat;
use super::html::HtmlRenderer;
use super::markdown::MarkdownRenderer;
use super::plaintext::PlaintextRenderer;
use super::renderer::Renderer;

static DEFAULT_REGISTRY: LazyLock<RendererRegistry> = LazyLock::new(RendererRegistry::standard);

/// Returns the shared registry holding the built-in renderers.
#[must_use]
pub fn default_registry() -> &'static RendererRegistry {
    &DEFAULT_REGISTRY
}

/// Ordered mapping from [`ExportFormat`] to its renderer.
#[derive(Default)]
pub struct RendererRegistry {
    entries: Vec<(ExportFormat, Box<dyn Renderer>)>,
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("formats", &self.list_supported_formats())
            .finish()
    }
}

impl RendererRegistry {
    /// Creates a registry with no renderers.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry with the built-in HTML, plain text and Markdown
    /// renderers, in that order.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(ExportFormat::Html, HtmlRenderer::new())
            .with(ExportFormat::Plaintext, PlaintextRenderer)
            .with(ExportFormat::Markdown, MarkdownRenderer)
    }

    /// Registers `renderer` under `format`.
    ///
    /// Registering an existing format replaces its renderer in place, so the
    /// listing order is unchanged.
    #[must_use]
    pub fn with(mut self, format: ExportFormat, renderer: impl Renderer + 'static) -> Self {
        let boxed: Box<dyn Renderer> = Box::new(renderer);
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == format) {
            entry.1 = boxed;
        } else {
            self.entries.push((format, boxed));
        }
        self
    }

    /// Looks up the renderer registered for `format`.
    #[must_use]
    pub fn get(&self, format: ExportFormat) -> Option<&dyn Renderer> {
        self.entries
            .iter()
            .find(|(key, _)| *key == format)
            .map(|(_, renderer)| renderer.as_ref())
    }

    /// Looks up the renderer for `format`, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] when nothing is registered
    /// under `format`.
    pub fn resolve(&self, format: ExportFormat) -> Result<&dyn Renderer, ExportError> {
        self.get(format)
            .ok_or_else(|| ExportError::unsupported(format.as_str()))
    }

    /// Reports whether `candidate` is exactly the key of a registered format.
    #[must_use]
    pub fn is_format_supported(&self, candidate: &str) -> bool {
        self.entries
            .iter()
            .any(|(key, _)| key.as_str() == candidate)
    }

    /// Returns the registered formats in registration order.
    #[must_use]
    pub fn list_supported_formats(&self) -> Vec<ExportFormat> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::export::test_helpers::StaticRenderer;

    #[rstest]
    fn standard_registry_lists_formats_in_registration_order() {
        let registry = RendererRegistry::standard();

        assert_eq!(
            registry.list_supported_formats(),
            vec![
                ExportFormat::Html,
                ExportFormat::Plaintext,
                ExportFormat::Markdown
            ]
        );
    }

    #[rstest]
    fn every_listed_format_is_supported() {
        let registry = default_registry();

        for format in registry.list_supported_formats() {
            assert!(registry.is_format_supported(format.as_str()));
            assert!(registry.get(format).is_some());
        }
    }

    #[rstest]
    #[case("svg")]
    #[case("Html")]
    #[case("MARKDOWN")]
    #[case("text")]
    #[case("")]
    fn unregistered_strings_are_unsupported(#[case] candidate: &str) {
        assert!(!default_registry().is_format_supported(candidate));
    }

    #[rstest]
    fn empty_registry_resolves_nothing() {
        let registry = RendererRegistry::empty();

        let err = registry
            .resolve(ExportFormat::Html)
            .err()
            .expect("nothing registered");

        assert_eq!(err, ExportError::unsupported("html"));
        assert!(!registry.is_format_supported("html"));
        assert!(registry.list_supported_formats().is_empty());
    }

    #[rstest]
    fn re_registering_replaces_in_place() {
        let registry = RendererRegistry::standard()
            .with(ExportFormat::Html, StaticRenderer::text("replaced"));

        assert_eq!(
            registry.list_supported_formats().first(),
            Some(&ExportFormat::Html)
        );
        let renderer = registry.resolve(ExportFormat::Html).expect("registered");
        assert_eq!(renderer.mime_type(), StaticRenderer::MIME_TYPE);
    }

    #[rstest]
    fn listing_is_stable_across_calls() {
        let registry = default_registry();

        assert_eq!(
            registry.list_supported_formats(),
            registry.list_supported_formats()
        );
    }
}
