//! Best-effort delayed removal of transient files.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use camino::Utf8PathBuf;

/// Removes `path` after `delay` on a detached thread.
///
/// The removal is not awaited and its failure is only logged. The returned
/// handle lets hosts that are about to exit wait for pending removals; it is
/// `None` when the cleanup thread could not be spawned.
#[must_use = "drop the handle to detach the cleanup, or join it to wait"]
pub fn schedule_removal(path: Utf8PathBuf, delay: Duration) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("diffexport-cleanup".to_owned())
        .spawn(move || {
            thread::sleep(delay);
            if let Err(error) = std::fs::remove_file(&path) {
                tracing::debug!("deferred removal of '{path}' failed: {error}");
            }
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(error) => {
            tracing::debug!("failed to spawn cleanup thread: {error}");
            None
        }
    }
}
