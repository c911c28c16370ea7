//! In-memory delivery sink for tests.
//!
//! [`RecordingSink`] stores every save and preview so tests can assert on
//! what the exporter delivered without touching the filesystem or a
//! browser.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::export::Artifact;

use super::error::DeliveryError;
use super::{DeliverySink, PreviewSurface};

/// A file save captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Filename passed to the sink.
    pub filename: String,
    /// Artifact passed to the sink.
    pub artifact: Artifact,
}

/// A preview captured by [`RecordingSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedPreview {
    /// Markup written into the surface.
    pub markup: String,
    /// Title set on the surface.
    pub title: Option<String>,
    /// Whether the surface was closed.
    pub closed: bool,
}

#[derive(Debug, Default)]
struct Recording {
    saves: Vec<SavedFile>,
    previews: Vec<RecordedPreview>,
}

/// Delivery sink that records calls instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    recording: Arc<Mutex<Recording>>,
    fail_saves: bool,
    block_surfaces: bool,
}

impl RecordingSink {
    /// Creates a sink where every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every save fail with [`DeliveryError::Io`].
    #[must_use]
    pub const fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Makes every surface request fail, like a blocked popup.
    #[must_use]
    pub const fn blocking_surfaces(mut self) -> Self {
        self.block_surfaces = true;
        self
    }

    /// Returns the files saved so far.
    #[must_use]
    pub fn saves(&self) -> Vec<SavedFile> {
        self.lock().saves.clone()
    }

    /// Returns the previews opened so far.
    #[must_use]
    pub fn previews(&self) -> Vec<RecordedPreview> {
        self.lock().previews.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.recording
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DeliverySink for RecordingSink {
    fn save_file(&self, artifact: &Artifact, filename: &str) -> Result<(), DeliveryError> {
        if self.fail_saves {
            return Err(DeliveryError::Io {
                message: "disk full".to_owned(),
            });
        }
        self.lock().saves.push(SavedFile {
            filename: filename.to_owned(),
            artifact: artifact.clone(),
        });
        Ok(())
    }

    fn open_surface(&self) -> Result<Box<dyn PreviewSurface>, DeliveryError> {
        if self.block_surfaces {
            return Err(DeliveryError::SurfaceUnavailable {
                message: "popup blocked".to_owned(),
            });
        }
        let index = {
            let mut recording = self.lock();
            recording.previews.push(RecordedPreview::default());
            recording.previews.len().saturating_sub(1)
        };
        Ok(Box::new(RecordingSurface {
            recording: Arc::clone(&self.recording),
            index,
        }))
    }
}

struct RecordingSurface {
    recording: Arc<Mutex<Recording>>,
    index: usize,
}

impl RecordingSurface {
    fn update(&self, apply: impl FnOnce(&mut RecordedPreview)) -> Result<(), DeliveryError> {
        let mut recording = self
            .recording
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let preview = recording
            .previews
            .get_mut(self.index)
            .ok_or_else(|| DeliveryError::SurfaceUnavailable {
                message: "surface was discarded".to_owned(),
            })?;
        apply(preview);
        Ok(())
    }
}

impl PreviewSurface for RecordingSurface {
    fn write_markup(&mut self, markup: &str) -> Result<(), DeliveryError> {
        self.update(|preview| markup.clone_into(&mut preview.markup))
    }

    fn set_title(&mut self, title: &str) -> Result<(), DeliveryError> {
        self.update(|preview| preview.title = Some(title.to_owned()))
    }

    fn close(&mut self) -> Result<(), DeliveryError> {
        self.update(|preview| preview.closed = true)
    }
}
