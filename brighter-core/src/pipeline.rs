//! Pipeline orchestrator.
//!
//! Sequences the whole run: audio extraction, the decode/brighten/sink
//! loop, frame-sequence re-encode, mux, and the optional container
//! transcode. Strictly sequential and single-threaded: every stage reads
//! files the previous stage produced, so each one fully completes (or
//! fails) before the next begins. Any fatal error aborts the remaining
//! stages; workspace cleanup is attempted on success and failure alike.

use crate::config::RunConfig;
use crate::decode::FrameSource;
use crate::enhance::brighten;
use crate::error::{CoreError, CoreResult};
use crate::external::{
    self, EncoderStage, audio_extract_command, frame_encode_command, mux_command, run_stage,
    transcode_command,
};
use crate::sink::FrameSink;
use crate::workspace::Workspace;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Name of the external transcoder binary expected on the PATH.
pub const ENCODER_BINARY: &str = "ffmpeg";

/// Name of the probe binary the frame source uses for stream metadata.
pub const PROBE_BINARY: &str = "ffprobe";

/// Statistics for a completed pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub frames: u64,
    pub frame_rate: f64,
    pub output_path: PathBuf,
    pub duration: Duration,
}

/// Runs the full brightness pipeline for one input video.
///
/// Validates the configuration and checks for the external encoder before
/// any workspace is created; afterwards the scratch directory is removed
/// best-effort whether the stages succeeded or not.
pub fn run_pipeline(config: &RunConfig) -> CoreResult<PipelineSummary> {
    let start = Instant::now();

    config.validate()?;
    external::check_dependency(ENCODER_BINARY)?;
    external::check_dependency(PROBE_BINARY)?;

    let workspace = Workspace::create()?;
    let result = run_stages(config, &workspace, start);
    // Best-effort: a cleanup failure is logged inside destroy() and never
    // changes the outcome of the run.
    workspace.destroy();
    result
}

fn run_stages(
    config: &RunConfig,
    workspace: &Workspace,
    start: Instant,
) -> CoreResult<PipelineSummary> {
    let audio_artifact = workspace.audio_path(&config.input_path);
    log::info!("Extracting audio from {}", config.input_path.display());
    run_stage(
        EncoderStage::AudioExtract,
        audio_extract_command(&config.input_path, &audio_artifact),
    )?;

    let mut source = FrameSource::open(&config.input_path)?;
    let frame_rate = source.frame_rate();
    let sink = FrameSink::new(workspace);

    log::info!("Brightening frames (factor {})", config.brightness);
    let mut frames: u64 = 0;
    while let Some(frame) = source.next_frame() {
        frames += 1;
        sink.write(frames, &brighten(&frame?, config.brightness))?;
    }
    source.finish()?;
    log::info!("Processed {} frames at {} fps", frames, frame_rate);

    ensure_frames_decoded(frames)?;

    let encoded_video = workspace.encoded_video_path();
    run_stage(
        EncoderStage::FrameEncode,
        frame_encode_command(&workspace.frame_pattern(), frame_rate, &encoded_video),
    )?;

    let muxed = config.mux_output_path();
    log::info!("Muxing adjusted video with original audio");
    run_stage(
        EncoderStage::Mux,
        mux_command(&encoded_video, &audio_artifact, &muxed),
    )?;

    if config.needs_transcode() {
        log::info!(
            "Transcoding {} to {}",
            muxed.display(),
            config.output_path.display()
        );
        run_stage(
            EncoderStage::Transcode,
            transcode_command(&muxed, &config.output_path),
        )?;
        // The muxed container is superseded by the transcoded output
        std::fs::remove_file(&muxed)?;
    }

    Ok(PipelineSummary {
        frames,
        frame_rate,
        output_path: config.output_path.clone(),
        duration: start.elapsed(),
    })
}

/// Never invoke the encoder against an empty frame sequence: the
/// image2 pattern would match nothing and the failure mode downstream
/// would be an opaque ffmpeg error instead of a typed one.
fn ensure_frames_decoded(frames: u64) -> CoreResult<()> {
    if frames == 0 {
        return Err(CoreError::EncodeStage {
            stage: EncoderStage::FrameEncode,
            reason: "no frames decoded from input".to_string(),
        });
    }
    Ok(())
}
