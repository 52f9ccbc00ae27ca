//! Flat-average grayscale transform.

use crate::types::PixelBuffer;

/// Convert `buffer` to grayscale in place.
///
/// Each pixel's R, G and B channels become `(r + g + b) / 3` with integer
/// truncation, computed over the original channel values. Alpha is left
/// untouched. This is deliberately an unweighted average, not a
/// luminance-weighted conversion.
pub fn apply(buffer: &mut PixelBuffer) {
    for px in buffer.data_mut().chunks_exact_mut(4) {
        let avg = ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8;
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    }
}
