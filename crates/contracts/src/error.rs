//! Layered error definitions
//!
//! Categorized by source: parse / run / texture / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum PipelineError {
    // ===== Parse Errors =====
    /// Command line could not be parsed
    #[error("invalid syntax: {message}")]
    ParseSyntax { message: String },

    /// Argument count, type, or value was rejected
    #[error("invalid arguments for '{command}': {message}")]
    ParseArguments { command: String, message: String },

    // ===== Run Errors =====
    /// Leading stage is not a generator or input kind
    #[error("pipeline cannot start with '{stage}': not a generator or input stage")]
    InvalidLeadingStage { stage: String },

    // ===== Texture Errors =====
    /// Image decode failure
    #[error("failed to decode image '{path}': {message}")]
    ImageDecode { path: String, message: String },

    /// Image encode/save failure
    #[error("failed to save image '{path}': {message}")]
    ImageSave { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a parse syntax error
    pub fn parse_syntax(message: impl Into<String>) -> Self {
        Self::ParseSyntax {
            message: message.into(),
        }
    }

    /// Create a parse arguments error
    pub fn parse_arguments(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseArguments {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an image decode error
    pub fn image_decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImageDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an image save error
    pub fn image_save(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImageSave {
            path: path.into(),
            message: message.into(),
        }
    }
}
