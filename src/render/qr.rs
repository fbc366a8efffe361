/// Rasterising QR symbols
use image::{Rgba, RgbaImage};

use crate::config;
use crate::error::{Result, Unavailable};
use crate::models::{Bitmap, Color, ECLevel, MaskPattern, QrSymbol};

/// How a payload is encoded and painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrOptions {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Forced mask, `None` picks the lowest penalty
    pub mask: Option<MaskPattern>,
    /// Pixels per module side (values below 1 are treated as 1)
    pub module_px: u32,
    /// Light border around the symbol, in modules
    pub quiet_zone: u32,
    /// Color of light modules and the quiet zone
    pub background: Color,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            ec_level: config::qr_ec_level(),
            mask: None,
            module_px: 1,
            quiet_zone: config::qr_quiet_zone(),
            background: Color::TRANSPARENT,
        }
    }
}

/// Paint `symbol` with dark modules in `color`
pub fn render_symbol(symbol: &QrSymbol, color: Color, options: &QrOptions) -> Result<Bitmap> {
    let module_px = options.module_px.max(1) as u64;
    let modules = symbol.size() as u64 + 2 * options.quiet_zone as u64;
    let side = modules * module_px;
    let area = side.checked_mul(side);
    if area.is_none_or(|area| area > config::max_pixels()) || side > u32::MAX as u64 {
        return Err(Unavailable::ContextAllocation {
            width: side,
            height: side,
        }
        .into());
    }

    let quiet_zone = options.quiet_zone as u64;
    let size = symbol.size() as u64;
    let dark: Rgba<u8> = color.into();
    let light: Rgba<u8> = options.background.into();

    let pixels = RgbaImage::from_fn(side as u32, side as u32, |x, y| {
        let mx = (x as u64 / module_px).checked_sub(quiet_zone);
        let my = (y as u64 / module_px).checked_sub(quiet_zone);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < size && my < size => {
                if symbol.is_dark(mx as usize, my as usize) {
                    dark
                } else {
                    light
                }
            }
            _ => light,
        }
    });

    tracing::debug!(side, module_px, quiet_zone, "rendered QR bitmap");
    Ok(Bitmap::from_image(pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::QrEncoder;

    fn symbol() -> QrSymbol {
        QrEncoder::new(ECLevel::L).encode(b"00000000").unwrap()
    }

    #[test]
    fn test_one_pixel_per_module() {
        let symbol = symbol();
        let options = QrOptions {
            quiet_zone: 0,
            ..QrOptions::default()
        };
        let bitmap = render_symbol(&symbol, Color::BLACK, &options).unwrap();
        assert_eq!(bitmap.dimensions(), (21, 21));
        assert_eq!(bitmap.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(bitmap.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_scale_and_quiet_zone() {
        let symbol = symbol();
        let options = QrOptions {
            module_px: 4,
            quiet_zone: 2,
            background: Color::WHITE,
            ..QrOptions::default()
        };
        let red = Color::rgb(200, 0, 0);
        let bitmap = render_symbol(&symbol, red, &options).unwrap();
        assert_eq!(bitmap.dimensions(), (100, 100));
        assert_eq!(bitmap.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(bitmap.pixel(7, 7), Some(Color::WHITE));
        // First finder module starts at (8, 8) and spans 4 pixels
        assert_eq!(bitmap.pixel(8, 8), Some(red));
        assert_eq!(bitmap.pixel(11, 11), Some(red));
        assert_eq!(bitmap.pixel(12, 12), Some(Color::WHITE));
        assert_eq!(bitmap.pixel(99, 99), Some(Color::WHITE));
    }

    #[test]
    fn test_zero_module_px_treated_as_one() {
        let options = QrOptions {
            module_px: 0,
            quiet_zone: 1,
            ..QrOptions::default()
        };
        let bitmap = render_symbol(&symbol(), Color::BLACK, &options).unwrap();
        assert_eq!(bitmap.dimensions(), (23, 23));
    }
}
