//! histeq-io - Grayscale image I/O
//!
//! Loads PNG, PGM (P2/P5), and JPEG files into a
//! [`histeq_core::PixelBuffer`], reducing color input to luma, and writes
//! buffers back out as 8-bit grayscale PNG or PGM.
//!
//! Format support is selected by Cargo features (`png-format`, `pnm`,
//! `jpeg`); a disabled format is reported as
//! [`IoError::UnsupportedFormat`].

mod error;
pub mod format;
mod gray;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use gray::luma;

use histeq_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Load an image file and reduce it to 8-bit grayscale.
///
/// The format is detected from the file contents, not the extension.
///
/// # Errors
///
/// Fails if the file cannot be opened, the format is unknown or disabled,
/// or the data cannot be decoded.
pub fn load_grayscale_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path).map_err(IoError::Io)?;
    let buffer = read_image_format(BufReader::new(file), format)?;
    log::debug!(
        "loaded {} ({:?}, {}x{})",
        path.display(),
        format,
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

/// Decode an in-memory image and reduce it to 8-bit grayscale.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<PixelBuffer> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pgm(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Save a buffer as an 8-bit grayscale image.
///
/// The format follows the extension of `path` (see
/// [`ImageFormat::from_path`]), defaulting to PNG.
pub fn save_grayscale_image<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    write_image(buffer, path, ImageFormat::from_path(path))
}

/// Write a buffer to a file in `format`.
pub fn write_image<P: AsRef<Path>>(
    buffer: &PixelBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    // Encode first so an unsupported format never leaves an empty file behind
    let data = write_image_mem(buffer, format)?;
    let file = File::create(path).map_err(IoError::Io)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&data)?;
    writer.flush()?;
    log::debug!("wrote {} ({:?}, {} bytes)", path.display(), format, data.len());
    Ok(())
}

/// Encode a buffer into memory in `format`.
pub fn write_image_mem(buffer: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    buffer.validate()?;
    let mut data = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(buffer, &mut data)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pgm(buffer, &mut data)?,
        ImageFormat::Jpeg => {
            return Err(IoError::UnsupportedFormat(
                "JPEG writing is not supported".to_string(),
            ));
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )));
        }
    }
    Ok(data)
}
