use std::str::FromStr;

/// Target geometry for a resize, in pixels
///
/// Kept as floating point so that zero, negative and non-finite requests are
/// representable and can be rejected instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size matching an existing pixel raster
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// Rounded pixel dimensions, `None` when either side is degenerate.
    ///
    /// Huge but finite sides saturate at `u64::MAX`; bounding the raster is
    /// left to the caller.
    pub fn to_pixels(&self) -> Option<(u64, u64)> {
        fn side(v: f64) -> Option<u64> {
            if !v.is_finite() || v <= 0.0 {
                return None;
            }
            let rounded = v.round();
            if rounded < 1.0 {
                return None;
            }
            Some(rounded as u64)
        }
        Some((side(self.width)?, side(self.height)?))
    }
}

/// Interpolation quality hint for resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    /// Platform default, same as `Low`
    #[default]
    Default,
    /// Nearest neighbour; keeps hard module edges on QR codes
    None,
    /// Bilinear
    Low,
    /// Bicubic (Catmull-Rom)
    Medium,
    /// Lanczos with a 3-lobe window
    High,
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Quality::Default),
            "none" | "nearest" => Ok(Quality::None),
            "low" | "bilinear" => Ok(Quality::Low),
            "medium" | "bicubic" => Ok(Quality::Medium),
            "high" | "lanczos" => Ok(Quality::High),
            other => Err(format!("unknown interpolation quality '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_rounds() {
        assert_eq!(Size::new(10.4, 20.6).to_pixels(), Some((10, 21)));
        assert_eq!(Size::from_pixels(640, 480).to_pixels(), Some((640, 480)));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(Size::new(0.0, 10.0).to_pixels(), None);
        assert_eq!(Size::new(10.0, -3.0).to_pixels(), None);
        assert_eq!(Size::new(0.4, 10.0).to_pixels(), None);
        assert_eq!(Size::new(f64::NAN, 10.0).to_pixels(), None);
        assert_eq!(Size::new(10.0, f64::INFINITY).to_pixels(), None);
    }

    #[test]
    fn test_huge_sizes_are_not_degenerate() {
        assert_eq!(
            Size::new(5.0e9, 1.0).to_pixels(),
            Some((5_000_000_000, 1))
        );
        assert_eq!(Size::new(1.0e300, 2.0).to_pixels(), Some((u64::MAX, 2)));
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("NONE".parse::<Quality>(), Ok(Quality::None));
        assert_eq!("high".parse::<Quality>(), Ok(Quality::High));
        assert!("ultra".parse::<Quality>().is_err());
    }
}
