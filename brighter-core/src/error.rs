use crate::external::EncoderStage;
use thiserror::Error;

/// Custom error types for brighter
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to create scratch workspace: {0}")]
    Workspace(String),

    #[error("Failed to open video '{path}': {reason}")]
    VideoOpen { path: String, reason: String },

    #[error("Frame processing failed: {0}")]
    FrameIo(String),

    #[error("{stage} stage failed: {reason}")]
    EncodeStage { stage: EncoderStage, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for brighter operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
