//! Histogram equalization regression test
//!
//! Equalizes the synthetic fixtures with several worker counts, checks
//! the table invariants, and writes the results for golden comparison.
//!
//! Run with:
//! ```
//! cargo test -p histeq-filter --test equalize_reg
//! ```

use histeq_core::{ErrorKind, Histogram, PixelBuffer};
use histeq_filter::{Equalizer, LevelMapper, apply_table, equalize, equalize_with_report};
use histeq_io::ImageFormat;
use histeq_test::{RegParams, fixtures};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn equalize_reg() {
    init_logger();
    let mut rp = RegParams::new("equalize");

    let sources = [
        fixtures::gradient(200, 50, true).unwrap(),
        fixtures::checkerboard(64, 48, 8, 90, 110).unwrap(),
        fixtures::noise(101, 77, fixtures::NOISE_SEED).unwrap(),
    ];

    for src in &sources {
        let (reference, report) = equalize_with_report(src, 1).unwrap();

        // Table is monotonic and anchored at the top
        rp.compare_values(1.0, if report.table.is_monotonic() { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(255.0, f64::from(report.table[255]), 0.0);
        rp.compare_values(src.len() as f64, report.histogram.total() as f64, 0.0);

        // The brightest occupied level always maps to 255
        let top = *report.histogram.occupied_levels().last().unwrap();
        rp.compare_values(255.0, f64::from(report.table[top]), 0.0);

        // Output is independent of the worker count
        for workers in [2, 3, 8, src.len(), src.len() + 7] {
            let dest = equalize(src, workers).unwrap();
            rp.compare_buffers(&reference, &dest);
        }

        // Every output pixel is table[input pixel]
        let expected: Vec<u8> = src.pixels().iter().map(|&p| report.table[p]).collect();
        rp.compare_tables(&expected, reference.pixels());

        rp.write_buffer_and_check(&reference, ImageFormat::Png).unwrap();
    }

    assert!(rp.cleanup(), "equalize regression test failed");
}

#[test]
fn equalize_contrast_reg() {
    init_logger();
    let mut rp = RegParams::new("equalize_contrast");

    // A low-contrast ramp in 0..=127 is stretched to reach 255
    let src = fixtures::gradient(128, 8, true).unwrap();
    let dest = Equalizer::with_workers(4).unwrap().equalize(&src).unwrap();
    let before = Histogram::from_pixels(src.pixels()).occupied_levels();
    let after = Histogram::from_pixels(dest.pixels()).occupied_levels();
    rp.compare_values(127.0, f64::from(*before.last().unwrap()), 0.0);
    rp.compare_values(255.0, f64::from(*after.last().unwrap()), 0.0);
    // Remapping can merge levels but never splits them
    rp.compare_values(1.0, if after.len() <= before.len() { 1.0 } else { 0.0 }, 0.0);

    // Equalizing twice gives the same table-applied result as applying the
    // second table to the first output
    let hist = Histogram::from_pixels(dest.pixels());
    let table = LevelMapper::map(&hist, dest.len() as u64).unwrap();
    let twice = equalize(&dest, 3).unwrap();
    let applied = apply_table(&dest, &table, 5).unwrap();
    rp.compare_buffers(&twice, &applied);

    assert!(rp.cleanup(), "equalize contrast regression test failed");
}

#[test]
fn equalize_scenarios_reg() {
    init_logger();
    let mut rp = RegParams::new("equalize_scenarios");

    // Four distinct levels, once each
    let src = PixelBuffer::from_vec(2, 2, vec![0, 85, 170, 255]).unwrap();
    let expected = PixelBuffer::from_vec(2, 2, vec![63, 127, 191, 255]).unwrap();
    for workers in [1, 2, 4, 16] {
        rp.compare_buffers(&expected, &equalize(&src, workers).unwrap());
    }

    // Uniform input goes to 255 everywhere
    let src = fixtures::uniform(31, 17, 42).unwrap();
    let white = fixtures::uniform(31, 17, 255).unwrap();
    rp.compare_buffers(&white, &equalize(&src, 6).unwrap());

    // Single pixel
    let src = PixelBuffer::from_vec(1, 1, vec![7]).unwrap();
    rp.compare_values(255.0, f64::from(equalize(&src, 3).unwrap().pixels()[0]), 0.0);

    assert!(rp.cleanup(), "equalize scenarios regression test failed");
}

#[test]
fn equalize_rejects_reg() {
    init_logger();

    let empty = PixelBuffer::from_raw_parts(0, 10, Vec::new()).unwrap();
    assert_eq!(equalize(&empty, 2).unwrap_err().kind(), ErrorKind::InvalidInput);

    let src = fixtures::uniform(4, 4, 1).unwrap();
    assert_eq!(equalize(&src, 0).unwrap_err().kind(), ErrorKind::InvalidInput);
}

#[test]
fn equalize_png_roundtrip_reg() {
    init_logger();
    let mut rp = RegParams::new("equalize_io");

    let src = fixtures::noise(64, 64, fixtures::NOISE_SEED).unwrap();
    let dest = equalize(&src, 4).unwrap();

    let data = histeq_io::write_image_mem(&dest, ImageFormat::Png).unwrap();
    let back = histeq_io::read_image_from_bytes(&data).unwrap();
    rp.compare_buffers(&dest, &back);

    let data = histeq_io::write_image_mem(&dest, ImageFormat::Pnm).unwrap();
    let back = histeq_io::read_image_from_bytes(&data).unwrap();
    rp.compare_buffers(&dest, &back);

    assert!(rp.cleanup(), "equalize I/O regression test failed");
}
