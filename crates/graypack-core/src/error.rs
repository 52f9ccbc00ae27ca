//! Error types for the Graypack conversion pipeline.
//!
//! Errors are organized by layer: pipeline errors carry the file path and
//! stage-specific context, service errors describe the business rules of the
//! upload/grayscale operations, and config errors cover load/parse/validate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Graypack operations.
#[derive(Error, Debug)]
pub enum GraypackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Service-level errors
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
///
/// None of these are retried: any pipeline error aborts the current batch.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The uploaded byte stream is not a valid ZIP container
    #[error("Corrupt archive: {message}")]
    CorruptArchive { message: String },

    /// File signature does not match the supported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// The container parsed but pixel data is truncated or invalid
    #[error("Corrupt image {path}: {message}")]
    CorruptImage { path: PathBuf, message: String },

    /// No image with the supported extension exists in the source directory
    #[error("No PNG images found in {0}")]
    NoImagesFound(PathBuf),

    /// Filesystem read/write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Business-rule and session errors for the upload/grayscale operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No archive bytes were supplied
    #[error("No file uploaded or file is empty")]
    EmptyUpload,

    /// Uploaded archive exceeds the configured size limit
    #[error("Archive too large: {size_mb}MB > {max_mb}MB")]
    ArchiveTooLarge { size_mb: u64, max_mb: u64 },

    /// No session identifier was supplied
    #[error("No session identifier provided")]
    MissingSession,

    /// The session identifier does not name an uploaded archive
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// An underlying pipeline failure
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Filesystem failure outside the pipeline proper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Whether this error is the caller's fault (a 400-class response at an
    /// HTTP boundary) rather than an internal failure.
    ///
    /// Internal failures are reported generically and logged in detail, so
    /// filesystem paths never leak outward.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyUpload
                | Self::ArchiveTooLarge { .. }
                | Self::MissingSession
                | Self::UnknownSession(_)
                | Self::Pipeline(PipelineError::NoImagesFound(_))
        )
    }
}

/// Convenience type alias for Graypack results.
pub type Result<T> = std::result::Result<T, GraypackError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
