//! The grayscale batch-conversion pipeline.
//!
//! Stages, in the order a batch runs them:
//! - **discovery**: list eligible PNG files in the source directory
//! - **codec**: decode a PNG file into a pixel buffer, encode one back
//! - **grayscale**: flat-average transform over a pixel buffer
//! - **batch**: orchestrates decode → transform → encode per image, then
//!   packages the destination directory

pub mod batch;
pub mod codec;
pub mod discovery;
pub mod grayscale;

// Re-exports for convenient access
pub use batch::{BatchPipeline, OUTPUT_ARCHIVE_NAME};
pub use codec::PngCodec;
