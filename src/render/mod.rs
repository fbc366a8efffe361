//! Raster operations
//!
//! - QR symbol painting
//! - Stretch-to-fit resizing
//! - Gaussian blur
//!
//! The two filters share premultiplied-alpha conversions in [`alpha`].

pub mod alpha;
pub mod blur;
pub mod qr;
pub mod resize;

pub use qr::QrOptions;
