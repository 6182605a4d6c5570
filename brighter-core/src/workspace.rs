//! Scratch workspace management and artifact naming.
//!
//! One `Workspace` holds every intermediate artifact for a single pipeline
//! run: the numbered frame images, the extracted audio track, and the
//! re-encoded (audio-less) video. The directory is freshly created with a
//! unique name per run, so concurrent runs and stale artifacts from a
//! prior failed run can never collide. All artifact names are defined here
//! and nowhere else; the frame sink and the encoder stages share this
//! naming contract instead of duplicating format strings.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Fixed name of the re-encoded intermediate video inside the workspace.
const ENCODED_VIDEO_NAME: &str = "video.mp4";

/// Extension of the extracted audio artifact.
const AUDIO_EXTENSION: &str = "wav";

/// Scratch directory scoped to one pipeline run.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh scratch directory in the system temp dir.
    /// Creation failure is fatal: continuing without a workspace would
    /// risk scattering artifacts into an unowned directory.
    pub fn create() -> CoreResult<Self> {
        let dir = TempFileBuilder::new()
            .prefix("brighter_")
            .tempdir()
            .map_err(|e| CoreError::Workspace(e.to_string()))?;
        log::debug!("Created scratch workspace at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the still-image artifact for the given 1-based frame index.
    /// No zero padding; indices must form a contiguous run 1..N for the
    /// frame-sequence encode to pick them all up.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.path().join(format!("frame{index}.png"))
    }

    /// The ffmpeg image2 pattern matching exactly the names produced by
    /// [`Workspace::frame_path`].
    pub fn frame_pattern(&self) -> PathBuf {
        self.dir.path().join("frame%d.png")
    }

    /// Path of the extracted audio artifact, derived from the input's
    /// base name.
    pub fn audio_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        self.dir.path().join(format!("{stem}.{AUDIO_EXTENSION}"))
    }

    /// Path of the re-encoded, audio-less intermediate video.
    pub fn encoded_video_path(&self) -> PathBuf {
        self.dir.path().join(ENCODED_VIDEO_NAME)
    }

    /// Removes the scratch directory and everything in it. Best-effort:
    /// a failure is logged and swallowed, never escalated.
    pub fn destroy(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            log::warn!(
                "Failed to clean up scratch workspace {}: {}",
                path.display(),
                e
            );
        } else {
            log::debug!("Removed scratch workspace {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_destroy() {
        let workspace = Workspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        assert!(path.is_dir());

        // Destroy removes the directory and its contents
        std::fs::write(workspace.frame_path(1), b"fake frame").unwrap();
        workspace.destroy();
        assert!(!path.exists());
    }

    #[test]
    fn test_distinct_workspaces_per_run() {
        let a = Workspace::create().unwrap();
        let b = Workspace::create().unwrap();
        assert_ne!(a.path(), b.path());
        a.destroy();
        b.destroy();
    }

    #[test]
    fn test_frame_naming_contract() {
        let workspace = Workspace::create().unwrap();

        // 1-based, no zero padding
        let first = workspace.frame_path(1);
        assert_eq!(first.file_name().unwrap(), "frame1.png");
        let tenth = workspace.frame_path(10);
        assert_eq!(tenth.file_name().unwrap(), "frame10.png");

        // Pattern lives in the same directory as the frames it matches
        let pattern = workspace.frame_pattern();
        assert_eq!(pattern.file_name().unwrap(), "frame%d.png");
        assert_eq!(pattern.parent(), first.parent());

        workspace.destroy();
    }

    #[test]
    fn test_audio_path_uses_input_stem() {
        let workspace = Workspace::create().unwrap();
        let audio = workspace.audio_path(Path::new("/videos/clip.mp4"));
        assert_eq!(audio.file_name().unwrap(), "clip.wav");
        workspace.destroy();
    }
}
