//! Host capabilities used to deliver export results.
//!
//! The exporter never writes files or opens windows itself. It calls a
//! [`DeliverySink`], which the host supplies:
//!
//! - [`FsDeliverySink`] saves artifacts into a directory.
//! - [`BrowserPreviewSink`] opens previews in the desktop browser.
//!
//! Tests substitute mocks or the recording sink from `test_support`.

mod browser;
mod deferred;
mod error;
mod filesystem;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use browser::{BrowserPreviewSink, PREVIEW_RELEASE_DELAY};
pub use deferred::schedule_removal;
pub use error::DeliveryError;
pub use filesystem::FsDeliverySink;

use crate::export::Artifact;

/// Host-provided delivery operations.
#[cfg_attr(test, mockall::automock)]
pub trait DeliverySink {
    /// Saves `artifact` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the artifact cannot be persisted.
    fn save_file(&self, artifact: &Artifact, filename: &str) -> Result<(), DeliveryError>;

    /// Opens a blank surface that markup can be written into.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::SurfaceUnavailable`] when the host refuses or
    /// cannot provide a surface.
    fn open_surface(&self) -> Result<Box<dyn PreviewSurface>, DeliveryError>;
}

/// A displayable surface obtained from [`DeliverySink::open_surface`].
#[cfg_attr(test, mockall::automock)]
pub trait PreviewSurface {
    /// Writes `markup` into the surface, replacing anything written before.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the surface rejects the write.
    fn write_markup(&mut self, markup: &str) -> Result<(), DeliveryError>;

    /// Sets the surface's title.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the surface rejects the title.
    fn set_title(&mut self, title: &str) -> Result<(), DeliveryError>;

    /// Finishes writing and presents the surface.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the surface cannot be shown.
    fn close(&mut self) -> Result<(), DeliveryError>;
}
