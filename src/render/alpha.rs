//! Premultiplied alpha conversions shared by the raster filters
//!
//! Filtering straight-alpha RGBA bleeds the color of transparent pixels
//! (usually black) into neighbouring opaque ones. Both resize and blur run
//! on premultiplied values and convert back afterwards.

use image::{ImageBuffer, Rgba, RgbaImage};

/// One pixel as `[r * a, g * a, b * a, a]` on the 0..=255 scale
pub type Premultiplied = [f32; 4];

/// 16-bit premultiplied raster, the working format for `imageops` filters
pub type Premultiplied16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

const U8_TO_U16: f32 = 257.0;

/// Premultiply every pixel, row-major
pub fn premultiply(image: &RgbaImage) -> Vec<Premultiplied> {
    image
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            let alpha = a as f32 / 255.0;
            [r as f32 * alpha, g as f32 * alpha, b as f32 * alpha, a as f32]
        })
        .collect()
}

/// Back to straight alpha; fully transparent pixels become transparent black
pub fn unpremultiply(pixels: &[Premultiplied], width: u32, height: u32) -> RgbaImage {
    let raw: Vec<u8> = pixels
        .iter()
        .flat_map(|&[r, g, b, a]| {
            let alpha = a.round().clamp(0.0, 255.0);
            if alpha == 0.0 {
                return [0, 0, 0, 0];
            }
            let scale = 255.0 / a;
            let channel = |v: f32| (v * scale).round().clamp(0.0, 255.0) as u8;
            [channel(r), channel(g), channel(b), alpha as u8]
        })
        .collect();
    RgbaImage::from_raw(width, height, raw).unwrap_or_else(|| RgbaImage::new(width, height))
}

/// Premultiplied copy of `image` widened to 16 bits per channel
pub fn to_premultiplied16(image: &RgbaImage) -> Premultiplied16 {
    let (width, height) = image.dimensions();
    let raw: Vec<u16> = premultiply(image)
        .into_iter()
        .flat_map(|px| px.map(|v| (v * U8_TO_U16).round().clamp(0.0, 65535.0) as u16))
        .collect();
    Premultiplied16::from_raw(width, height, raw)
        .unwrap_or_else(|| Premultiplied16::new(width, height))
}

/// Straight-alpha RGBA8 from a 16-bit premultiplied raster
pub fn from_premultiplied16(image: &Premultiplied16) -> RgbaImage {
    let pixels: Vec<Premultiplied> = image
        .pixels()
        .map(|p| p.0.map(|v| v as f32 / U8_TO_U16))
        .collect();
    unpremultiply(&pixels, image.width(), image.height())
}
