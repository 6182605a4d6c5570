//! Run configuration and container constants.
//!
//! A `RunConfig` is built once by the caller (the CLI) and passed by
//! reference to the pipeline; no component reads ambient state.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Container extensions accepted as pipeline input.
pub const SUPPORTED_CONTAINERS: &[&str] = &["mp4", "avi"];

/// Container the mux stage always produces. Outputs requesting a different
/// extension go through the additional transcode stage.
pub const MUX_CONTAINER: &str = "avi";

/// Default output filename when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "brighter.avi";

/// Default brightness factor (documented range 1-9, 1 = unchanged).
pub const DEFAULT_BRIGHTNESS: u32 = 3;

/// Upper end of the documented brightness range. Larger factors are
/// accepted (the transform clips per channel) but warned about.
pub const DOCUMENTED_MAX_BRIGHTNESS: u32 = 9;

/// Configuration for a single pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Video file to brighten
    pub input_path: PathBuf,

    /// Where the final muxed (and possibly transcoded) video is written
    pub output_path: PathBuf,

    /// Uniform linear brightness factor, 1 = identity
    pub brightness: u32,
}

impl RunConfig {
    pub fn new(input_path: PathBuf, output_path: PathBuf, brightness: u32) -> Self {
        Self {
            input_path,
            output_path,
            brightness,
        }
    }

    /// Validates the configuration before any work begins.
    ///
    /// The input extension must be a supported container and the brightness
    /// factor must be at least 1. Factors above the documented range are
    /// accepted with a warning since the transform saturates per channel.
    pub fn validate(&self) -> CoreResult<()> {
        let ext = extension_lowercase(&self.input_path);
        match ext {
            Some(ref e) if SUPPORTED_CONTAINERS.contains(&e.as_str()) => {}
            _ => {
                return Err(CoreError::Config(format!(
                    "unsupported input container for '{}': expected one of {}",
                    self.input_path.display(),
                    SUPPORTED_CONTAINERS.join(", ")
                )));
            }
        }

        if self.brightness < 1 {
            return Err(CoreError::Config(
                "brightness factor must be a positive integer (1 = unchanged)".to_string(),
            ));
        }
        if self.brightness > DOCUMENTED_MAX_BRIGHTNESS {
            log::warn!(
                "Brightness factor {} is outside the documented 1-{} range; channels will clip hard",
                self.brightness,
                DOCUMENTED_MAX_BRIGHTNESS
            );
        }

        Ok(())
    }

    /// Path the mux stage writes to: the configured output with its
    /// extension replaced by the mux container. When no transcode will
    /// follow, this is the configured output itself.
    pub fn mux_output_path(&self) -> PathBuf {
        if self.needs_transcode() {
            self.output_path.with_extension(MUX_CONTAINER)
        } else {
            self.output_path.clone()
        }
    }

    /// Whether the requested output needs the extra container-transcode
    /// stage after muxing.
    pub fn needs_transcode(&self) -> bool {
        extension_lowercase(&self.output_path).as_deref() != Some(MUX_CONTAINER)
    }
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(input: &str, output: &str, brightness: u32) -> RunConfig {
        RunConfig::new(PathBuf::from(input), PathBuf::from(output), brightness)
    }

    #[test]
    fn test_supported_extensions_validate() {
        assert!(config("clip.mp4", "out.avi", 3).validate().is_ok());
        assert!(config("clip.avi", "out.avi", 3).validate().is_ok());
        // Extension matching is case-insensitive
        assert!(config("clip.MP4", "out.avi", 3).validate().is_ok());
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = config("clip.mkv", "out.avi", 3).validate().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = config("clip", "out.avi", 3).validate().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_zero_brightness_rejected() {
        let err = config("clip.mp4", "out.avi", 0).validate().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_out_of_range_brightness_accepted() {
        // Above the documented range: warned about, not rejected
        assert!(config("clip.mp4", "out.avi", 20).validate().is_ok());
    }

    #[test]
    fn test_mux_output_path_matches_output_base() {
        let cfg = config("clip.mp4", "result.mp4", 1);
        assert_eq!(cfg.mux_output_path(), PathBuf::from("result.avi"));
        assert!(cfg.needs_transcode());
    }

    #[test]
    fn test_avi_output_skips_transcode() {
        let cfg = config("clip.mp4", "result.avi", 1);
        assert_eq!(cfg.mux_output_path(), PathBuf::from("result.avi"));
        assert!(!cfg.needs_transcode());
    }
}
