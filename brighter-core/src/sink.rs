//! Frame sink: persists enhanced frames as numbered image artifacts.

use crate::error::{CoreError, CoreResult};
use crate::workspace::Workspace;
use image::RgbImage;

/// Writes frames into the workspace under the shared naming contract.
///
/// Indices are 1-based and must be contiguous; the frame-sequence encode
/// stops at the first gap in the numbering. Any write failure is fatal,
/// so a partially written artifact can never silently truncate the
/// sequence the encoder sees.
pub struct FrameSink<'a> {
    workspace: &'a Workspace,
}

impl<'a> FrameSink<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Persists one frame as `frame{index}.png`.
    pub fn write(&self, index: u64, frame: &RgbImage) -> CoreResult<()> {
        let path = self.workspace.frame_path(index);
        frame
            .save(&path)
            .map_err(|e| CoreError::FrameIo(format!("failed to write frame {index}: {e}")))
    }
}
