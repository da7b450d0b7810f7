//! PNG image format support
//!
//! Reading accepts every PNG color type. Palettes and sub-8-bit gray are
//! expanded by the decoder, color is reduced to luma, 16-bit samples keep
//! their high byte, and alpha is dropped. Writing always produces 8-bit
//! grayscale.

use crate::gray::to_gray;
use crate::{IoError, IoResult};
use histeq_core::PixelBuffer;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as 8-bit grayscale
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let width = reader.info().width;
    let height = reader.info().height;
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output depth: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let row_bytes = width as usize * channels * bytes_per_sample;
    let line_size = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks(line_size).take(height as usize) {
        let row = row.get(..row_bytes).ok_or_else(|| {
            IoError::InvalidData(format!("PNG row shorter than {} bytes", row_bytes))
        })?;
        pixels.extend(to_gray(row, channels, bytes_per_sample));
    }

    log::debug!(
        "read PNG {}x{} ({:?}, {:?})",
        width,
        height,
        color_type,
        bit_depth
    );
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

/// Write an 8-bit grayscale PNG image
pub fn write_png<W: Write>(buffer: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(buffer.pixels())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
