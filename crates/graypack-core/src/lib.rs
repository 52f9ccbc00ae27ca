//! Graypack Core - grayscale batch conversion for ZIP archives of PNGs.
//!
//! # Architecture
//!
//! A pure, synchronous pipeline over the local filesystem:
//!
//! ```text
//! ZIP upload → Extract → per image: Decode → Grayscale → Encode → Pack ZIP
//! ```
//!
//! The service layer wraps the pipeline in two session-oriented operations
//! mirroring what a web front-end needs: `upload` (store + extract one
//! archive) and `grayscale` (convert one uploaded session).
//!
//! # Usage
//!
//! ```rust,no_run
//! use graypack_core::{Config, Graypack};
//!
//! fn main() -> graypack_core::Result<()> {
//!     let service = Graypack::new(Config::load()?);
//!     let receipt = service.upload(&std::fs::read("photos.zip")?)?;
//!     let produced = service.grayscale(&receipt.session_id)?;
//!     println!("{} grayscale image(s)", produced.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod archive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod types;

// Re-exports for convenient access
pub use archive::ArchiveExtractor;
pub use config::Config;
pub use error::{ConfigError, GraypackError, PipelineError, PipelineResult, Result, ServiceError};
pub use pipeline::{BatchPipeline, PngCodec, OUTPUT_ARCHIVE_NAME};
pub use service::Graypack;
pub use types::{ExtractionResult, PixelBuffer, UploadReceipt};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
