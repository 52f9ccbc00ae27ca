//! Core data types for the Graypack conversion pipeline.

use serde::Serialize;
use std::path::PathBuf;

/// Bytes per pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

/// An in-memory RGBA pixel buffer.
///
/// Invariant: `data.len() == width * height * 4`, channel order R, G, B, A.
/// The pixel at `(x, y)` starts at byte index `(width * y + x) * 4`.
/// Fields are private so the length invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGBA bytes.
    ///
    /// Returns `None` if either dimension is zero or the data length does
    /// not equal `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels (always > 0).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (always > 0).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte offset of the pixel at `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        (self.width as usize * y as usize + x as usize) * CHANNELS
    }

    /// The RGBA channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// The raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw RGBA bytes.
    ///
    /// The slice length is fixed, so the invariant holds across mutation.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Result of extracting an uploaded archive: extracted files partitioned
/// into supported images and everything else.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Directory the archive was inflated into
    pub extract_dir: PathBuf,

    /// Extracted PNG files, sorted by path
    pub images: Vec<PathBuf>,

    /// Extracted non-PNG files, sorted by path
    pub invalid: Vec<PathBuf>,
}

/// Response of the upload operation.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// Identifier of the upload session; input to the grayscale operation
    pub session_id: String,

    /// Extracted image paths, sorted
    pub images: Vec<PathBuf>,

    /// Present when the archive contained non-PNG files; names them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
