//! Frame source: decodes the input video into in-memory RGB frames.
//!
//! The input is probed with ffprobe for the video stream's nominal frame
//! rate (needed later by the frame-sequence encode), then an ffmpeg child
//! is spawned decoding to rawvideo rgb24 on a pipe. Frames arrive lazily
//! in presentation order; the stream is finite, forward-only, and not
//! restartable once exhausted.

use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use ffmpeg_sidecar::iter::FfmpegIterator;
use image::RgbImage;
use std::path::Path;

/// A lazy stream of decoded video frames plus the stream's frame rate.
pub struct FrameSource {
    child: FfmpegChild,
    events: FfmpegIterator,
    frame_rate: f64,
    finished: bool,
}

impl FrameSource {
    /// Opens the input video for decoding.
    ///
    /// Fails with `VideoOpen` if the file cannot be probed, has no video
    /// stream, or the decoder cannot be spawned.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let frame_rate = probe_frame_rate(path)?;
        log::debug!(
            "Opened {} for decoding at {} fps",
            path.display(),
            frame_rate
        );

        let mut cmd = FfmpegCommand::new();
        cmd.hide_banner();
        cmd.input(path.to_string_lossy().as_ref());
        cmd.rawvideo();

        let mut child = cmd.spawn().map_err(|e| CoreError::VideoOpen {
            path: path.display().to_string(),
            reason: format!("failed to spawn decoder: {e}"),
        })?;
        let events = child.iter().map_err(|e| CoreError::VideoOpen {
            path: path.display().to_string(),
            reason: format!("failed to read decoder output: {e}"),
        })?;

        Ok(Self {
            child,
            events,
            frame_rate,
            finished: false,
        })
    }

    /// Nominal frame rate of the video stream in frames per second.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Returns the next decoded frame, or `None` at end of stream.
    pub fn next_frame(&mut self) -> Option<CoreResult<RgbImage>> {
        for event in self.events.by_ref() {
            if let FfmpegEvent::OutputFrame(frame) = event {
                return Some(raster_from(frame.width, frame.height, frame.data));
            }
        }
        None
    }

    /// Reaps the decoder child, releasing the stream handle. Call after
    /// the frame stream is exhausted; a decoder that exited non-zero is
    /// surfaced as a frame IO failure.
    pub fn finish(mut self) -> CoreResult<()> {
        self.finished = true;
        let status = self
            .child
            .wait()
            .map_err(|e| CoreError::FrameIo(format!("failed waiting for decoder: {e}")))?;
        if !status.success() {
            return Err(CoreError::FrameIo(format!(
                "decoder exited with {status}"
            )));
        }
        Ok(())
    }
}

impl Drop for FrameSource {
    /// A source abandoned mid-stream (an error aborted the run before
    /// `finish`) must not leave the decoder child running unreaped.
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.child.kill() {
            log::debug!("Failed to kill abandoned decoder: {}", e);
        }
        if let Err(e) = self.child.wait() {
            log::debug!("Failed to reap abandoned decoder: {}", e);
        }
    }
}

/// Builds an owned RGB raster from a raw rgb24 buffer, verifying the
/// buffer actually matches the advertised geometry.
fn raster_from(width: u32, height: u32, data: Vec<u8>) -> CoreResult<RgbImage> {
    RgbImage::from_raw(width, height, data).ok_or_else(|| {
        CoreError::FrameIo(format!(
            "decoded frame buffer does not match {width}x{height} rgb24 geometry"
        ))
    })
}

/// Probes the input and returns the video stream's nominal frame rate.
fn probe_frame_rate(path: &Path) -> CoreResult<f64> {
    let metadata = ffprobe::ffprobe(path).map_err(|e| CoreError::VideoOpen {
        path: path.display().to_string(),
        reason: format!("ffprobe failed: {e}"),
    })?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| CoreError::VideoOpen {
            path: path.display().to_string(),
            reason: "no video stream found".to_string(),
        })?;

    parse_frame_rate(&video_stream.r_frame_rate)
        .filter(|rate| *rate > 0.0)
        .ok_or_else(|| CoreError::VideoOpen {
            path: path.display().to_string(),
            reason: format!(
                "could not determine frame rate from '{}'",
                video_stream.r_frame_rate
            ),
        })
}

/// Parses a frame rate string (e.g. "30000/1001" or "25").
fn parse_frame_rate(frame_rate_str: &str) -> Option<f64> {
    if let Some((num, den)) = frame_rate_str.split_once('/') {
        let numerator: f64 = num.parse().ok()?;
        let denominator: f64 = den.parse().ok()?;
        if denominator != 0.0 {
            return Some(numerator / denominator);
        }
        return None;
    }
    frame_rate_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("30000/1001"), Some(30000.0 / 1001.0));
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("garbage"), None);
    }

    #[test]
    fn test_raster_geometry_checked() {
        // 2x2 rgb24 frame: 12 bytes
        let frame = raster_from(2, 2, vec![0u8; 12]).unwrap();
        assert_eq!(frame.dimensions(), (2, 2));

        // Short buffer is a frame IO error, not a panic
        let err = raster_from(2, 2, vec![0u8; 5]).unwrap_err();
        assert!(matches!(err, CoreError::FrameIo(_)));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(matches!(
            FrameSource::open(Path::new("/no/such/clip.mp4")),
            Err(CoreError::VideoOpen { .. })
        ));
    }

    #[test]
    fn test_drop_reaps_abandoned_decoder() {
        // Stand-in child that blocks on its piped stdin forever, like a
        // decoder abandoned mid-stream. The test only terminates if drop
        // kills and reaps it.
        let mut cmd = FfmpegCommand::new_with_path("cat");
        let mut child = cmd.spawn().unwrap();
        let events = child.iter().unwrap();
        let source = FrameSource {
            child,
            events,
            frame_rate: 25.0,
            finished: false,
        };
        drop(source);
    }
}
