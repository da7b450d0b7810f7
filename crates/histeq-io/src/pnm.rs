//! PGM (Portable Gray Map) format support
//!
//! Reads binary (P5) and ASCII (P2) PGM with any maxval up to 65535;
//! samples are rescaled to 0..=255 when maxval is not 255. Writes binary
//! P5 with maxval 255. Color PPM and bitmap PBM are not supported.

use crate::{IoError, IoResult};
use histeq_core::PixelBuffer;
use std::io::{BufRead, Write};

/// Read a PGM image (P2/P5) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P2`/`P5` magic
pub fn read_pgm<R: BufRead>(mut reader: R) -> IoResult<PixelBuffer> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;

    let mut header = HeaderParser { data: &data, pos: 0 };
    let magic = header.magic()?;
    let width = header.number("width")?;
    let height = header.number("height")?;
    let maxval = header.number("maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PGM maxval {} out of range", maxval)));
    }
    let too_large = || IoError::InvalidData("PGM dimensions too large".to_string());
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;

    let samples: Vec<u32> = match magic {
        b'5' => {
            // Exactly one whitespace byte separates the header from the raster
            let start = header.pos + 1;
            let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
            let end = len
                .checked_mul(bytes_per_sample)
                .and_then(|n| n.checked_add(start))
                .ok_or_else(too_large)?;
            let raster = data
                .get(start..end)
                .ok_or_else(|| IoError::InvalidData("PGM raster truncated".to_string()))?;
            if bytes_per_sample == 1 {
                raster.iter().map(|&b| u32::from(b)).collect()
            } else {
                raster
                    .chunks_exact(2)
                    .map(|s| (u32::from(s[0]) << 8) | u32::from(s[1]))
                    .collect()
            }
        }
        _ => {
            let mut samples = Vec::with_capacity(len.min(data.len()));
            for _ in 0..len {
                samples.push(header.number("sample")?);
            }
            samples
        }
    };

    let pixels = samples
        .into_iter()
        .map(|v| {
            let v = v.min(maxval);
            if maxval == 255 {
                v as u8
            } else {
                ((v * 255 + maxval / 2) / maxval) as u8
            }
        })
        .collect();

    log::debug!("read PGM P{} {}x{} maxval {}", magic as char, width, height, maxval);
    Ok(PixelBuffer::from_vec(width, height, pixels)?)
}

/// Write a buffer as binary PGM (P5, maxval 255) to a writer.
pub fn write_pgm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", buffer.width(), buffer.height())?;
    writer.write_all(buffer.pixels())?;
    writer.flush()?;
    Ok(())
}

struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderParser<'_> {
    fn magic(&mut self) -> IoResult<u8> {
        match self.data.get(..2) {
            Some([b'P', m @ (b'2' | b'5')]) => {
                self.pos = 2;
                Ok(*m)
            }
            _ => Err(IoError::UnsupportedFormat(
                "not a P2/P5 PGM file".to_string(),
            )),
        }
    }

    /// Skip whitespace and `#` comments, then parse a decimal number.
    fn number(&mut self, what: &str) -> IoResult<u32> {
        loop {
            match self.data.get(self.pos) {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'#') => {
                    while let Some(&b) = self.data.get(self.pos) {
                        self.pos += 1;
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }

        let start = self.pos;
        while self.data.get(self.pos).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.data[start..self.pos]).unwrap_or("");
        digits
            .parse::<u32>()
            .map_err(|_| IoError::InvalidData(format!("PGM {}: expected a number", what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let buf = PixelBuffer::from_vec(3, 2, vec![0, 10, 20, 200, 250, 255]).unwrap();
        let mut bytes = Vec::new();
        write_pgm(&buf, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"P5\n3 2\n255\n"));
        let buf2 = read_pgm(Cursor::new(bytes)).unwrap();
        assert_eq!(buf2, buf);
    }

    #[test]
    fn test_pgm_ascii_with_comment() {
        let text = b"P2\n# made by hand\n2 2\n15\n0 5\n10 15\n";
        let buf = read_pgm(Cursor::new(text.to_vec())).unwrap();
        assert_eq!((buf.width(), buf.height()), (2, 2));
        assert_eq!(buf.pixels(), &[0, 85, 170, 255]);
    }

    #[test]
    fn test_pgm_16bit() {
        let mut bytes = b"P5 2 1 65535\n".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00]);
        let buf = read_pgm(Cursor::new(bytes)).unwrap();
        assert_eq!(buf.pixels(), &[255, 0]);
    }

    #[test]
    fn test_pgm_truncated() {
        let bytes = b"P5\n4 4\n255\n\x00\x01".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(bytes)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pgm_oversized_header() {
        let bytes = b"P5 4294967295 4294967295 65535\n\x00\x00".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(bytes)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_pgm_zero_width_rejected() {
        let bytes = b"P5\n0 4\n255\n".to_vec();
        assert!(matches!(read_pgm(Cursor::new(bytes)), Err(IoError::Core(_))));
    }

    #[test]
    fn test_ppm_unsupported() {
        let bytes = b"P6\n1 1\n255\n\x00\x00\x00".to_vec();
        assert!(matches!(
            read_pgm(Cursor::new(bytes)),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
