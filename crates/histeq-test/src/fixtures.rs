//! Deterministic synthetic images
//!
//! These replace external sample images so every regression test can run
//! from a clean checkout.

use crate::TestResult;
use histeq_core::PixelBuffer;

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
///
/// Values are confined to the lower half of the range when `low_contrast`
/// is set, which is the typical input for equalization.
pub fn gradient(width: u32, height: u32, low_contrast: bool) -> TestResult<PixelBuffer> {
    let span = if low_contrast { 127 } else { 255 };
    let denom = width.saturating_sub(1).max(1) as u64;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..height {
        for x in 0..width {
            pixels.push((x as u64 * span / denom) as u8);
        }
    }
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

/// Every pixel set to `value`.
pub fn uniform(width: u32, height: u32, value: u8) -> TestResult<PixelBuffer> {
    Ok(PixelBuffer::filled(width, height, value)?)
}

/// Alternating `cell`-sized squares of `dark` and `light`.
pub fn checkerboard(
    width: u32,
    height: u32,
    cell: u32,
    dark: u8,
    light: u8,
) -> TestResult<PixelBuffer> {
    let cell = cell.max(1);
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 1;
            pixels.push(if on { light } else { dark });
        }
    }
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

/// Pseudo-random pixels from a 64-bit LCG.
///
/// The same `seed` always gives the same image.
pub fn noise(width: u32, height: u32, seed: u64) -> TestResult<PixelBuffer> {
    let mut state = seed;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..width as usize * height as usize {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        pixels.push((state >> 56) as u8);
    }
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

/// Seed used by the regression tests for [`noise`].
pub const NOISE_SEED: u64 = 0x5EED_1234;
