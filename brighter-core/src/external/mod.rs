//! Interactions with the external ffmpeg binary.
//!
//! Every encode, mux, and transcode stage in the pipeline shells out to
//! ffmpeg; this module owns the dependency preflight and the per-stage
//! command construction and execution.

use crate::error::{CoreError, CoreResult};
use std::io;
use std::process::{Command, Stdio};

pub mod ffmpeg;

pub use ffmpeg::{
    EncoderStage, audio_extract_command, frame_encode_command, mux_command, run_stage,
    transcode_command,
};

/// Checks that a required external command is available and executable.
///
/// Runs the command with `-version`, discarding output. Called once at
/// pipeline startup, before any workspace is created; a missing binary
/// fails the whole run immediately.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::error!("Dependency '{}' not found on PATH", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check '{}': {}", cmd_name, e);
            Err(CoreError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_reported() {
        let err = check_dependency("definitely-not-a-real-binary-5b2a").unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(_)));
    }
}
