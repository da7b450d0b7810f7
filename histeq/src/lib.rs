//! histeq - Parallel histogram equalization for 8-bit grayscale images
//!
//! Stretches the intensity distribution of an image so its cumulative
//! histogram becomes close to linear. The histogram and the remapping pass
//! are split across a configurable number of workers; the result does not
//! depend on the worker count.
//!
//! # Example
//!
//! ```
//! use histeq::PixelBuffer;
//! use histeq::filter::equalize;
//!
//! let src = PixelBuffer::from_vec(2, 2, vec![0, 85, 170, 255]).unwrap();
//! let dest = equalize(&src, 4).unwrap();
//! assert_eq!(dest.pixels(), &[63, 127, 191, 255]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use histeq_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use histeq_filter as filter;
pub use histeq_io as io;
