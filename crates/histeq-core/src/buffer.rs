//! PixelBuffer - 8-bit grayscale image container
//!
//! A `PixelBuffer` owns a flat, row-major array of 8-bit intensity samples.
//! Row `y` occupies `pixels[y * width .. (y + 1) * width]`.
//!
//! # Ownership model
//!
//! A buffer is owned by whichever stage currently holds it. Stages that
//! produce a new image allocate a fresh buffer and hand it to the caller;
//! nothing is shared behind reference counts.

use crate::error::{Error, Result};

/// 8-bit grayscale image buffer.
///
/// # Examples
///
/// ```
/// use histeq_core::PixelBuffer;
///
/// let buf = PixelBuffer::from_vec(2, 2, vec![0, 85, 170, 255]).unwrap();
/// assert_eq!(buf.len(), 4);
/// assert_eq!(buf.get(1, 1), Some(255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, 0)
    }

    /// Create a buffer with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::AllocationFailed`] if the pixel storage cannot be reserved.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        check_dimensions(width, height)?;
        let len = pixel_count(width, height);
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed { bytes: len })?;
        pixels.resize(len, value);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::BufferSizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        Self::from_raw_parts(width, height, pixels)
    }

    /// Wrap existing pixel data, checking only that the length agrees with
    /// the dimensions.
    ///
    /// Unlike [`PixelBuffer::from_vec`] this accepts a zero width or height
    /// (with empty data). Such a buffer is rejected later by every
    /// processing stage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_raw_parts(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of pixels (width x height).
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check whether the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the pixel data in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Get row `y`, or `None` if out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.pixels.get(start..start + w)
    }

    /// Validate that this buffer can be processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::EmptyImage`] for a buffer without pixels.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        if self.pixels.is_empty() {
            return Err(Error::EmptyImage);
        }
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
