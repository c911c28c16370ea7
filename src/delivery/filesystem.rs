//! Saves exported artifacts into a local directory.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::export::Artifact;

use super::error::DeliveryError;
use super::{DeliverySink, PreviewSurface};

/// Delivery sink that writes artifacts into `output_dir`.
///
/// Each save writes to a hidden staging file first and renames it into
/// place, so a failed save never leaves a truncated artifact under the final
/// name. Previews are not supported.
#[derive(Debug, Clone)]
pub struct FsDeliverySink {
    output_dir: Utf8PathBuf,
}

impl FsDeliverySink {
    /// Creates a sink that saves into `output_dir`, creating it on demand.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory artifacts are saved into.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    fn open_output_dir(&self) -> Result<Dir, DeliveryError> {
        Dir::create_ambient_dir_all(&self.output_dir, ambient_authority()).map_err(|error| {
            DeliveryError::io(
                &format!("failed to create output directory '{}'", self.output_dir),
                &error,
            )
        })?;
        Dir::open_ambient_dir(&self.output_dir, ambient_authority()).map_err(|error| {
            DeliveryError::io(
                &format!("failed to open output directory '{}'", self.output_dir),
                &error,
            )
        })
    }
}

impl DeliverySink for FsDeliverySink {
    fn save_file(&self, artifact: &Artifact, filename: &str) -> Result<(), DeliveryError> {
        ensure_plain_filename(filename)?;
        let dir = self.open_output_dir()?;

        let staged = StagedFile::new(&dir);
        dir.write(staged.name(), artifact.bytes()).map_err(|error| {
            DeliveryError::io(&format!("failed to write '{}'", staged.name()), &error)
        })?;
        staged.commit(filename)?;

        tracing::debug!(
            "saved {} bytes ({}) to '{}'",
            artifact.bytes().len(),
            artifact.mime_type(),
            self.output_dir.join(filename)
        );
        Ok(())
    }

    fn open_surface(&self) -> Result<Box<dyn PreviewSurface>, DeliveryError> {
        Err(DeliveryError::SurfaceUnavailable {
            message: "the filesystem sink cannot display previews".to_owned(),
        })
    }
}

fn ensure_plain_filename(filename: &str) -> Result<(), DeliveryError> {
    if Utf8Path::new(filename).file_name() == Some(filename) {
        Ok(())
    } else {
        Err(DeliveryError::InvalidFilename {
            filename: filename.to_owned(),
        })
    }
}

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A staging file that is removed on drop unless committed.
///
/// Its name does not depend on the target, so targets at the filesystem's
/// name-length limit can still be staged.
struct StagedFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl<'dir> StagedFile<'dir> {
    fn new(dir: &'dir Dir) -> Self {
        let sequence = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            dir,
            name: format!(".diffexport-{}-{sequence}.partial", process::id()),
            committed: false,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn commit(mut self, target: &str) -> Result<(), DeliveryError> {
        self.dir
            .rename(&self.name, self.dir, target)
            .map_err(|error| DeliveryError::io(&format!("failed to move into '{target}'"), &error))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(error) = self.dir.remove_file(&self.name) {
            tracing::debug!("failed to remove staging file '{}': {error}", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn output_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn sink_for(dir: &TempDir) -> FsDeliverySink {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("exports")).expect("UTF-8 path");
        FsDeliverySink::new(path)
    }

    #[rstest]
    fn saves_bytes_under_filename(output_dir: TempDir) {
        let sink = sink_for(&output_dir);
        let artifact = Artifact::new(b"+ added\n".to_vec(), "text/plain");

        sink.save_file(&artifact, "a-diff.txt").expect("save succeeds");

        let written = std::fs::read(output_dir.path().join("exports").join("a-diff.txt"))
            .expect("file exists");
        assert_eq!(written, b"+ added\n");
    }

    #[rstest]
    fn leaves_no_staging_file_behind(output_dir: TempDir) {
        let sink = sink_for(&output_dir);
        let artifact = Artifact::new(b"x".to_vec(), "text/plain");

        sink.save_file(&artifact, "out.txt").expect("save succeeds");

        let names: Vec<String> = std::fs::read_dir(output_dir.path().join("exports"))
            .expect("dir exists")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.txt".to_owned()]);
    }

    #[rstest]
    fn saves_filenames_at_the_name_length_limit(output_dir: TempDir) {
        let sink = sink_for(&output_dir);
        let artifact = Artifact::new(b"x".to_vec(), "text/plain");
        let filename = format!("{}.txt", "d".repeat(251));

        sink.save_file(&artifact, &filename).expect("save succeeds");

        assert!(output_dir.path().join("exports").join(&filename).is_file());
    }

    #[rstest]
    fn reports_its_output_dir(output_dir: TempDir) {
        let sink = sink_for(&output_dir);

        assert!(sink.output_dir().ends_with("exports"));
    }

    #[rstest]
    #[case("../escape.txt")]
    #[case("nested/out.txt")]
    #[case("..")]
    #[case("")]
    fn rejects_filenames_with_path_components(output_dir: TempDir, #[case] filename: &str) {
        let sink = sink_for(&output_dir);
        let artifact = Artifact::new(Vec::new(), "text/plain");

        let err = sink
            .save_file(&artifact, filename)
            .expect_err("path components rejected");

        assert_eq!(
            err,
            DeliveryError::InvalidFilename {
                filename: filename.to_owned()
            }
        );
    }

    #[rstest]
    fn cannot_open_preview_surface(output_dir: TempDir) {
        let sink = sink_for(&output_dir);

        assert!(matches!(
            sink.open_surface(),
            Err(DeliveryError::SurfaceUnavailable { .. })
        ));
    }
}
