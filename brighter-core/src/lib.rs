//! Core library for the brighter video brightness pipeline.
//!
//! Converts an input video into a brightness-adjusted copy by driving the
//! external `ffmpeg` binary through a sequential, file-based pipeline:
//! audio extraction, per-frame decode/brighten/persist, frame-sequence
//! re-encode, audio/video mux, and an optional container transcode. All
//! intermediate artifacts live in a per-run scratch workspace that is
//! removed when the run ends.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use brighter_core::{RunConfig, run_pipeline};
//! use std::path::PathBuf;
//!
//! let config = RunConfig::new(
//!     PathBuf::from("clip.mp4"),
//!     PathBuf::from("clip_bright.mp4"),
//!     3,
//! );
//! let summary = run_pipeline(&config).unwrap();
//! println!("{} frames -> {}", summary.frames, summary.output_path.display());
//! ```

pub mod config;
pub mod decode;
pub mod enhance;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod sink;
pub mod workspace;

// Re-exports for public API
pub use config::{DEFAULT_BRIGHTNESS, DEFAULT_OUTPUT_NAME, RunConfig, SUPPORTED_CONTAINERS};
pub use decode::FrameSource;
pub use enhance::brighten;
pub use error::{CoreError, CoreResult};
pub use external::EncoderStage;
pub use pipeline::{PipelineSummary, run_pipeline};
pub use sink::FrameSink;
pub use workspace::Workspace;
