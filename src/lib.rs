//! wallet_imaging - image helpers for wallet front ends
//!
//! Three stateless conversions on RGBA bitmaps:
//!
//! * [`Bitmap::from_qr_code`] renders a payload as a QR code, one pixel per
//!   module, dark modules in the requested color.
//! * [`Bitmap::resize`] stretches a bitmap to a target size with a chosen
//!   interpolation quality.
//! * [`Bitmap::blur`] applies a Gaussian blur that keeps the original extent.
//!
//! Every operation returns [`ImageError`] when the result cannot be
//! produced. The QR encoder itself lives in [`encoder`] and is usable on its
//! own when only the module matrix is needed.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// The [`ImageCodec`] trait and its pure-Rust implementation
pub mod codec;
/// Process-wide settings read from the environment
pub mod config;
/// QR symbol encoding (Reed-Solomon, masking, module placement)
pub mod encoder;
/// Error type shared by every operation
pub mod error;
/// Core data structures (Bitmap, Color, Size, BitMatrix, QrSymbol, etc.)
pub mod models;
/// Pixel producers: QR rasterising, resampling and blurring
pub mod render;

pub use codec::{ImageCodec, NativeCodec};
pub use encoder::QrEncoder;
pub use error::{ImageError, Result, Unavailable};
pub use models::{Bitmap, Color, ECLevel, MaskPattern, QrSymbol, Quality, Size, Version};
pub use render::QrOptions;

/// Render `data` as a QR code with dark modules in `color`
///
/// Shorthand for [`Bitmap::from_qr_code`] using the default codec.
pub fn qr_image(data: &[u8], color: Color) -> Result<Bitmap> {
    Bitmap::from_qr_code(data, color)
}
