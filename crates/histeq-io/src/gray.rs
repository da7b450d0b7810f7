//! Reduction of decoded samples to one 8-bit channel

/// Integer luma of an RGB sample: `(77 r + 150 g + 29 b) >> 8`.
///
/// The weights sum to 256, so white maps to 255.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

/// Convert interleaved samples to gray.
///
/// `channels` is 1 (gray), 2 (gray + alpha), 3 (RGB), or 4 (RGBA);
/// `bytes_per_sample` is 1 or 2 (big-endian, the high byte is kept).
/// Alpha is dropped.
pub(crate) fn to_gray(data: &[u8], channels: usize, bytes_per_sample: usize) -> Vec<u8> {
    let stride = channels * bytes_per_sample;
    data.chunks_exact(stride)
        .map(|px| {
            let s = |c: usize| px[c * bytes_per_sample];
            match channels {
                1 | 2 => s(0),
                _ => luma(s(0), s(1), s(2)),
            }
        })
        .collect()
}
