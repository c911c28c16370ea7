//! Opens HTML previews in the desktop browser.
//!
//! A preview surface buffers markup and title until it is closed, then
//! writes a temporary `.html` file, hands it to the browser and schedules
//! the file's removal once the browser has had time to load it.

use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use minijinja::HtmlEscape;

use crate::export::Artifact;

use super::deferred::schedule_removal;
use super::error::DeliveryError;
use super::{DeliverySink, PreviewSurface};

/// How long a preview file outlives the launch of its viewer.
pub const PREVIEW_RELEASE_DELAY: Duration = Duration::from_secs(5);

static PREVIEW_COUNTER: AtomicU64 = AtomicU64::new(0);

type Launcher = dyn Fn(&Utf8Path) -> Result<(), DeliveryError> + Send + Sync;

/// Delivery sink that shows previews in a browser.
///
/// Saving artifacts is not supported; pair it with a filesystem sink when a
/// host needs both.
#[derive(Clone)]
pub struct BrowserPreviewSink {
    temp_dir: Utf8PathBuf,
    release_delay: Duration,
    launcher: Arc<Launcher>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl fmt::Debug for BrowserPreviewSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserPreviewSink")
            .field("temp_dir", &self.temp_dir)
            .field("release_delay", &self.release_delay)
            .finish_non_exhaustive()
    }
}

impl BrowserPreviewSink {
    /// Creates a sink that opens previews with the system default browser,
    /// or with `app` when given.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Io`] when the system temporary directory is
    /// not valid UTF-8.
    pub fn new(app: Option<String>) -> Result<Self, DeliveryError> {
        let temp_dir = Utf8PathBuf::from_path_buf(std::env::temp_dir()).map_err(|path| {
            DeliveryError::Io {
                message: format!("temporary directory '{}' is not UTF-8", path.display()),
            }
        })?;
        Ok(Self::with_launcher(temp_dir, move |path| {
            launch_browser(path, app.as_deref())
        }))
    }

    /// Creates a sink with an explicit temporary directory and launcher.
    #[must_use]
    pub fn with_launcher(
        temp_dir: impl Into<Utf8PathBuf>,
        launcher: impl Fn(&Utf8Path) -> Result<(), DeliveryError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            release_delay: PREVIEW_RELEASE_DELAY,
            launcher: Arc::new(launcher),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Overrides how long preview files are kept after launching.
    #[must_use]
    pub const fn release_delay(mut self, delay: Duration) -> Self {
        self.release_delay = delay;
        self
    }

    /// Blocks until every scheduled preview cleanup has run.
    ///
    /// Hosts about to exit call this so preview files are not left behind.
    pub fn wait_for_cleanup(&self) {
        let handles: Vec<JoinHandle<()>> = lock_pending(&self.pending).drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                tracing::debug!("preview cleanup thread panicked");
            }
        }
    }
}

impl DeliverySink for BrowserPreviewSink {
    fn save_file(&self, _artifact: &Artifact, filename: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::Io {
            message: format!("the browser sink cannot save files (requested '{filename}')"),
        })
    }

    fn open_surface(&self) -> Result<Box<dyn PreviewSurface>, DeliveryError> {
        Dir::create_ambient_dir_all(&self.temp_dir, ambient_authority()).map_err(|error| {
            DeliveryError::SurfaceUnavailable {
                message: format!("cannot use '{}': {error}", self.temp_dir),
            }
        })?;
        let dir = Dir::open_ambient_dir(&self.temp_dir, ambient_authority()).map_err(|error| {
            DeliveryError::SurfaceUnavailable {
                message: format!("cannot open '{}': {error}", self.temp_dir),
            }
        })?;

        let sequence = PREVIEW_COUNTER.fetch_add(1, Ordering::Relaxed);
        let file_name = format!("diffexport-preview-{}-{sequence}.html", process::id());

        Ok(Box::new(BrowserSurface {
            dir,
            path: self.temp_dir.join(&file_name),
            file_name,
            markup: String::new(),
            title: None,
            closed: false,
            release_delay: self.release_delay,
            launcher: Arc::clone(&self.launcher),
            pending: Arc::clone(&self.pending),
        }))
    }
}

struct BrowserSurface {
    dir: Dir,
    path: Utf8PathBuf,
    file_name: String,
    markup: String,
    title: Option<String>,
    closed: bool,
    release_delay: Duration,
    launcher: Arc<Launcher>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl BrowserSurface {
    fn remove_now(&self) {
        if let Err(error) = self.dir.remove_file(&self.file_name) {
            tracing::debug!("failed to remove preview '{}': {error}", self.path);
        }
    }
}

impl PreviewSurface for BrowserSurface {
    fn write_markup(&mut self, markup: &str) -> Result<(), DeliveryError> {
        markup.clone_into(&mut self.markup);
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), DeliveryError> {
        self.title = Some(title.to_owned());
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeliveryError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let document = match &self.title {
            Some(title) => with_title(&self.markup, title),
            None => self.markup.clone(),
        };
        if let Err(error) = self.dir.write(&self.file_name, document.as_bytes()) {
            self.remove_now();
            return Err(DeliveryError::io(
                &format!("failed to write '{}'", self.path),
                &error,
            ));
        }

        if let Err(error) = (self.launcher)(&self.path) {
            self.remove_now();
            return Err(error);
        }

        if let Some(handle) = schedule_removal(self.path.clone(), self.release_delay) {
            let mut pending = lock_pending(&self.pending);
            pending.retain(|running| !running.is_finished());
            pending.push(handle);
        }
        tracing::debug!("opened preview '{}'", self.path);
        Ok(())
    }
}

/// Locks the pending cleanups, recovering the list from a poisoned lock.
fn lock_pending(pending: &Mutex<Vec<JoinHandle<()>>>) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

fn launch_browser(path: &Utf8Path, app: Option<&str>) -> Result<(), DeliveryError> {
    let launched = match app {
        Some(app_name) => open::with_detached(path.as_str(), app_name),
        None => open::that_detached(path.as_str()),
    };
    launched.map_err(|error| DeliveryError::Launch {
        message: format!("could not open '{path}': {error}"),
    })
}

/// Sets the document title, replacing an existing `<title>` element or
/// inserting one into `<head>`.
fn with_title(markup: &str, title: &str) -> String {
    let element = format!("<title>{}</title>", HtmlEscape(title));

    if let Some((before, rest)) = markup.split_once("<title>") {
        if let Some((_, after)) = rest.split_once("</title>") {
            return format!("{before}{element}{after}");
        }
    }
    if let Some((before, after)) = markup.split_once("<head>") {
        return format!("{before}<head>{element}{after}");
    }
    format!("{element}{markup}")
}
