//! Image processing primitives for sprite preparation.
//!
//! # Modules
//!
//! - [`resize`]: Bounding-dimension downscale (shrink)
//! - [`background`]: Near-white background keying (nobg)
//! - [`encode`]: Lossless-optimized PNG encode

pub mod background;
pub mod encode;
pub mod resize;
