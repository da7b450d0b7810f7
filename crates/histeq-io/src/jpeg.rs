//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. 8-bit and 16-bit
//! grayscale are taken as-is (16-bit keeps the high byte); RGB is reduced
//! with [`crate::luma`]. CMYK images are rejected.
//!
//! JPEG *writing* is not supported because `jpeg-decoder` is decode-only.

use crate::gray::to_gray;
use crate::{IoError, IoResult};
use histeq_core::PixelBuffer;
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let (channels, bytes_per_sample) = match info.pixel_format {
        PixelFormat::L8 => (1, 1),
        PixelFormat::L16 => (1, 2),
        PixelFormat::RGB24 => (3, 1),
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let expected = width as usize * height as usize * channels * bytes_per_sample;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            data.len(),
            expected
        )));
    }

    let pixels = to_gray(&data[..expected], channels, bytes_per_sample);
    log::debug!(
        "read JPEG {}x{} {:?}",
        width,
        height,
        info.pixel_format
    );
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_jpeg_garbage() {
        let data = vec![0xFF, 0xD8, 0x00, 0x01, 0x02];
        assert!(matches!(
            read_jpeg(Cursor::new(data)),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_read_jpeg_empty() {
        assert!(read_jpeg(Cursor::new(Vec::<u8>::new())).is_err());
    }
}
