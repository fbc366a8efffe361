use std::path::Path;

use image::{DynamicImage, ImageResult, RgbaImage};

use super::{Color, Quality, Size};
use crate::codec::{ImageCodec, NativeCodec};
use crate::error::{Result, Unavailable};

/// Owned RGBA8 raster consumed and produced by every image operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    /// Wrap an existing RGBA buffer
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Build from raw, row-major RGBA bytes (4 bytes per pixel)
    pub fn from_rgba(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = raw.len();
        RgbaImage::from_raw(width, height, raw)
            .map(Self::from_image)
            .ok_or_else(|| Unavailable::MalformedBuffer { expected, actual }.into())
    }

    /// Load and convert any format the `image` crate can decode
    pub fn open<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        Ok(Self::from(image::open(path)?))
    }

    /// Encode to a file, format chosen from the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.pixels.save(path)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel at (x, y), `None` out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some((*self.pixels.get_pixel(x, y)).into())
    }

    /// Borrow the underlying buffer
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Take the underlying buffer
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// QR code for `data`, dark modules in `color`, default options
    pub fn from_qr_code(data: &[u8], color: Color) -> Result<Self> {
        NativeCodec::default().encode_qr(data, color)
    }

    /// Stretch to `size` using the given interpolation quality
    pub fn resize(&self, size: Size, quality: Quality) -> Result<Self> {
        NativeCodec::default().resize(self, size, quality)
    }

    /// Gaussian blur with standard deviation `radius` pixels
    pub fn blur(&self, radius: f32) -> Result<Self> {
        NativeCodec::default().blur(self, radius)
    }
}

impl From<RgbaImage> for Bitmap {
    fn from(pixels: RgbaImage) -> Self {
        Self::from_image(pixels)
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(image: DynamicImage) -> Self {
        Self::from_image(image.into_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_length() {
        let bitmap = Bitmap::from_rgba(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        assert_eq!(bitmap.dimensions(), (2, 1));
        assert_eq!(bitmap.pixel(1, 0), Some(Color::WHITE));
        assert_eq!(bitmap.pixel(2, 0), None);

        let err = Bitmap::from_rgba(2, 2, vec![0; 8]).unwrap_err();
        assert_eq!(
            err.reason(),
            &Unavailable::MalformedBuffer {
                expected: 16,
                actual: 8
            }
        );
    }

    #[test]
    fn test_empty() {
        assert!(Bitmap::from_image(RgbaImage::new(0, 5)).is_empty());
        assert!(!Bitmap::from_image(RgbaImage::new(1, 1)).is_empty());
    }

    #[test]
    fn test_dynamic_image_conversion() {
        let gray = DynamicImage::new_luma8(3, 4);
        let bitmap = Bitmap::from(gray);
        assert_eq!(bitmap.dimensions(), (3, 4));
        assert_eq!(bitmap.pixel(0, 0), Some(Color::BLACK));
    }
}
