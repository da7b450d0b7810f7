//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header,
//! and picks an output format from a file extension.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// PNG format
    #[default]
    Png,
    /// PNM (PGM) format
    Pnm,
    /// JFIF JPEG format (read only)
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pnm => "pgm",
            Self::Jpeg => "jpg",
        }
    }

    /// Pick a format from the extension of `path`.
    ///
    /// Paths without a recognized extension map to PNG.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pgm") | Some("pnm") => Self::Pnm,
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PGM formats
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_ASCII || first_two == magic::PGM_BINARY {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_pgm() {
        assert_eq!(
            detect_format_from_bytes(b"P5\n100 100\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P2\n2 2\n255\n").unwrap(),
            ImageFormat::Pnm
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"GIF89a\x00\x00").is_err());
        assert!(detect_format_from_bytes(b"P6\n1 1\n255\n").is_err());
        assert!(detect_format_from_bytes(b"P").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormat::from_path("out.png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("out.PGM"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("a/b.pnm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("photo.jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("output"), ImageFormat::Png);
    }
}
