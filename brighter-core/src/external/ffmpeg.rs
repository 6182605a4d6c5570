//! Stage-specific ffmpeg command construction and execution.
//!
//! Each pipeline stage that shells out to ffmpeg has its own argument
//! profile. The builders only assemble commands; `run_stage` spawns the
//! process, blocks until it exits, and turns spawn failures and non-zero
//! exits into typed stage errors. There are no retries: any stage failure
//! aborts the remaining pipeline.

use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::fmt;
use std::path::Path;

/// The four external-encoder invocations of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderStage {
    AudioExtract,
    FrameEncode,
    Mux,
    Transcode,
}

impl fmt::Display for EncoderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncoderStage::AudioExtract => "audio extraction",
            EncoderStage::FrameEncode => "frame-sequence encode",
            EncoderStage::Mux => "mux",
            EncoderStage::Transcode => "container transcode",
        };
        f.write_str(name)
    }
}

/// Extracts the audio track to a standalone file: stereo, 44.1 kHz,
/// 160 kbps, video stream excluded.
pub fn audio_extract_command(input: &Path, audio_artifact: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.input(input.to_string_lossy().as_ref());
    cmd.args(["-vn", "-ac", "2", "-ar", "44100", "-b:a", "160k"]);
    cmd.overwrite();
    cmd.output(audio_artifact.to_string_lossy().as_ref());
    cmd
}

/// Re-encodes the numbered frame artifacts into an audio-less video at
/// the source frame rate. `frame_pattern` is the image2 pattern from the
/// workspace naming contract.
pub fn frame_encode_command(
    frame_pattern: &Path,
    frame_rate: f64,
    encoded_video: &Path,
) -> FfmpegCommand {
    let rate = frame_rate.to_string();
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    // Input option: must precede -i
    cmd.args(["-framerate", &rate]);
    cmd.input(frame_pattern.to_string_lossy().as_ref());
    cmd.args(["-r", &rate, "-vcodec", "png", "-an"]);
    cmd.overwrite();
    cmd.output(encoded_video.to_string_lossy().as_ref());
    cmd
}

/// Combines the re-encoded video with the extracted audio. Both streams
/// are copied bit-for-bit, not re-encoded.
pub fn mux_command(encoded_video: &Path, audio_artifact: &Path, muxed: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.input(encoded_video.to_string_lossy().as_ref());
    cmd.input(audio_artifact.to_string_lossy().as_ref());
    cmd.args(["-vcodec", "copy", "-acodec", "copy"]);
    cmd.overwrite();
    cmd.output(muxed.to_string_lossy().as_ref());
    cmd
}

/// Re-encodes the muxed file into the requested target container/codec
/// pair. Only invoked when the requested output extension differs from
/// the mux container.
pub fn transcode_command(muxed: &Path, output: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.input(muxed.to_string_lossy().as_ref());
    cmd.args([
        "-b:a", "128k", "-vcodec", "mpeg4", "-b:v", "1200k", "-flags", "+aic+mv4",
    ]);
    cmd.overwrite();
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Spawns the command and blocks until the external process exits.
///
/// Failure to spawn and a non-zero exit are both surfaced as
/// `EncodeStage` errors tagged with the failing stage, so callers can
/// tell which invocation died without parsing messages.
pub fn run_stage(stage: EncoderStage, mut cmd: FfmpegCommand) -> CoreResult<()> {
    log::debug!("Running {} command: {:?}", stage, cmd);

    let mut child = cmd.spawn().map_err(|e| CoreError::EncodeStage {
        stage,
        reason: format!("failed to spawn ffmpeg: {e}"),
    })?;

    // Drain the event stream so ffmpeg can never block on a full stderr
    // pipe; error-level output is kept visible at debug level.
    let events = child.iter().map_err(|e| CoreError::EncodeStage {
        stage,
        reason: format!("failed to read ffmpeg output: {e}"),
    })?;
    for event in events {
        if let FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, msg) = event {
            log::debug!("[{}] ffmpeg: {}", stage, msg);
        }
    }

    let status = child.wait().map_err(|e| CoreError::EncodeStage {
        stage,
        reason: format!("failed waiting for ffmpeg: {e}"),
    })?;

    if !status.success() {
        log::error!("{} failed: ffmpeg exited with {}", stage, status);
        return Err(CoreError::EncodeStage {
            stage,
            reason: format!("ffmpeg exited with {status}"),
        });
    }

    log::debug!("{} completed", stage);
    Ok(())
}
