//! PNG decode and encode for pixel buffers.
//!
//! Both operations are file-scoped and stateless; no shared state survives
//! across calls.

use std::fs;
use std::io;
use std::path::Path;

use image::{ExtendedColorType, ImageError, ImageFormat};

use crate::error::{PipelineError, PipelineResult};
use crate::types::PixelBuffer;

/// 8-byte PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decodes PNG files into RGBA pixel buffers and encodes them back.
pub struct PngCodec;

impl PngCodec {
    /// Decode the PNG file at `path` fully into memory as RGBA8.
    ///
    /// Fails with `UnsupportedFormat` when the file signature is not PNG,
    /// `CorruptImage` when the container parses but the pixel data does
    /// not, and `Io` on read failure.
    pub fn decode(path: &Path) -> PipelineResult<PixelBuffer> {
        let bytes = fs::read(path)?;

        if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
            return Err(PipelineError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
            });
        }

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).map_err(
            |e| PipelineError::CorruptImage {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        )?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw()).ok_or_else(|| {
            PipelineError::CorruptImage {
                path: path.to_path_buf(),
                message: "decoded pixel data does not match dimensions".to_string(),
            }
        })
    }

    /// Serialize `buffer` as a PNG file at `path`.
    ///
    /// The destination directory must already exist; creating it is the
    /// caller's responsibility.
    pub fn encode(buffer: &PixelBuffer, path: &Path) -> PipelineResult<()> {
        image::save_buffer_with_format(
            path,
            buffer.data(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|e| match e {
            ImageError::IoError(io_err) => PipelineError::Io(io_err),
            other => PipelineError::Io(io::Error::other(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        image::save_buffer_with_format(
            path,
            &data,
            width,
            height,
            ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )
        .unwrap();
    }

    #[test]
    fn test_decode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        write_png(&path, 2, 2, [255, 0, 0, 255]);

        let buffer = PngCodec::decode(&path).unwrap();
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixel(1, 1), [255, 0, 0, 255]);

        let out = dir.path().join("copy.png");
        PngCodec::encode(&buffer, &out).unwrap();
        let reloaded = PngCodec::decode(&out).unwrap();
        assert_eq!(reloaded, buffer);
    }

    #[test]
    fn test_decode_rejects_non_png_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        fs::write(&path, b"GIF89a not actually a png").unwrap();

        let err = PngCodec::decode(&path).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        write_png(&good, 4, 4, [1, 2, 3, 4]);

        // Valid signature, truncated body
        let bytes = fs::read(&good).unwrap();
        let bad = dir.path().join("bad.png");
        fs::write(&bad, &bytes[..12]).unwrap();

        let err = PngCodec::decode(&bad).unwrap_err();
        assert!(matches!(err, PipelineError::CorruptImage { .. }));
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PngCodec::decode(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn test_encode_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = PixelBuffer::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        let err = PngCodec::encode(&buffer, &dir.path().join("nope/out.png")).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
