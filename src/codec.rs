//! The image utility facade
//!
//! [`ImageCodec`] is the seam between callers and whatever produces pixels.
//! [`NativeCodec`] is the pure-Rust implementation used by the `Bitmap`
//! convenience methods; other backends (a platform filter stack, a GPU
//! path, a test double) implement the same trait without touching callers.

use crate::encoder::QrEncoder;
use crate::error::Result;
use crate::models::{Bitmap, Color, Quality, Size};
use crate::render::{self, QrOptions};

/// Three independent, stateless image conversions
pub trait ImageCodec: Send + Sync {
    /// QR code bitmap for `data` with dark modules painted in `color`
    fn encode_qr(&self, data: &[u8], color: Color) -> Result<Bitmap>;

    /// `bitmap` stretched to `size`
    fn resize(&self, bitmap: &Bitmap, size: Size, quality: Quality) -> Result<Bitmap>;

    /// `bitmap` with a Gaussian blur of standard deviation `radius`
    fn blur(&self, bitmap: &Bitmap, radius: f32) -> Result<Bitmap>;
}

/// Pure-Rust codec: built-in QR encoder, `image` resampling, rayon blur
#[derive(Debug, Clone, Default)]
pub struct NativeCodec {
    qr: QrOptions,
}

impl NativeCodec {
    /// Codec with process-wide defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with explicit QR options
    pub fn with_options(qr: QrOptions) -> Self {
        Self { qr }
    }

    /// QR options in effect
    pub fn qr_options(&self) -> &QrOptions {
        &self.qr
    }
}

impl ImageCodec for NativeCodec {
    fn encode_qr(&self, data: &[u8], color: Color) -> Result<Bitmap> {
        let mut encoder = QrEncoder::new(self.qr.ec_level);
        if let Some(mask) = self.qr.mask {
            encoder = encoder.with_mask(mask);
        }
        let symbol = encoder.encode(data)?;
        render::qr::render_symbol(&symbol, color, &self.qr)
    }

    fn resize(&self, bitmap: &Bitmap, size: Size, quality: Quality) -> Result<Bitmap> {
        render::resize::resize(bitmap, size, quality)
    }

    fn blur(&self, bitmap: &Bitmap, radius: f32) -> Result<Bitmap> {
        render::blur::blur(bitmap, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unavailable;
    use crate::models::ECLevel;

    /// Stand-in backend that never produces an image
    struct Unavailable404;

    impl ImageCodec for Unavailable404 {
        fn encode_qr(&self, _: &[u8], _: Color) -> Result<Bitmap> {
            Err(Unavailable::EmptySource.into())
        }
        fn resize(&self, _: &Bitmap, _: Size, _: Quality) -> Result<Bitmap> {
            Err(Unavailable::EmptySource.into())
        }
        fn blur(&self, _: &Bitmap, _: f32) -> Result<Bitmap> {
            Err(Unavailable::EmptySource.into())
        }
    }

    fn thumbnail(codec: &dyn ImageCodec, data: &[u8]) -> Option<Bitmap> {
        let qr = codec.encode_qr(data, Color::BLACK).ok()?;
        codec
            .resize(&qr, Size::new(84.0, 84.0), Quality::None)
            .ok()
    }

    #[test]
    fn test_trait_objects_are_interchangeable() {
        let native = NativeCodec::with_options(QrOptions {
            ec_level: ECLevel::M,
            quiet_zone: 0,
            ..QrOptions::default()
        });
        let thumb = thumbnail(&native, b"litecoin:LQTpS3VaYTjCr4s9Y1t5zbeY26zevf7Fb3");
        assert_eq!(thumb.map(|b| b.dimensions()), Some((84, 84)));
        assert!(thumbnail(&Unavailable404, b"x").is_none());
    }

    #[test]
    fn test_options_reach_the_encoder() {
        let codec = NativeCodec::with_options(QrOptions {
            ec_level: ECLevel::H,
            module_px: 3,
            quiet_zone: 4,
            ..QrOptions::default()
        });
        let bitmap = codec.encode_qr(b"00000000", Color::BLACK).unwrap();
        // 8 digits at level H still fit version 1
        assert_eq!(bitmap.dimensions(), ((21 + 8) * 3, (21 + 8) * 3));
        assert_eq!(codec.qr_options().ec_level, ECLevel::H);
    }
}
