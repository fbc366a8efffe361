//! Stretch-to-fit resampling
//!
//! Pixels are resampled premultiplied, so transparent neighbours never tint
//! the edges of opaque content.

use image::imageops::{self, FilterType};

use crate::config;
use crate::error::{Result, Unavailable};
use crate::models::{Bitmap, Quality, Size};
use crate::render::alpha::{from_premultiplied16, to_premultiplied16};

/// Resampling filter for an interpolation quality hint
pub fn filter_for(quality: Quality) -> FilterType {
    match quality {
        Quality::None => FilterType::Nearest,
        Quality::Low | Quality::Default => FilterType::Triangle,
        Quality::Medium => FilterType::CatmullRom,
        Quality::High => FilterType::Lanczos3,
    }
}

/// Scale `bitmap` to exactly `size` (aspect ratio is not preserved)
pub fn resize(bitmap: &Bitmap, size: Size, quality: Quality) -> Result<Bitmap> {
    let Some((width, height)) = size.to_pixels() else {
        return Err(Unavailable::DegenerateSize {
            width: size.width,
            height: size.height,
        }
        .into());
    };
    if bitmap.is_empty() {
        return Err(Unavailable::EmptySource.into());
    }
    let fits = width
        .checked_mul(height)
        .is_some_and(|area| area <= config::max_pixels());
    let (Ok(target_width), Ok(target_height), true) =
        (u32::try_from(width), u32::try_from(height), fits)
    else {
        return Err(Unavailable::ContextAllocation { width, height }.into());
    };

    let filter = filter_for(quality);
    tracing::debug!(
        from_width = bitmap.width(),
        from_height = bitmap.height(),
        width,
        height,
        ?filter,
        "resizing bitmap"
    );
    let premultiplied = to_premultiplied16(bitmap.as_image());
    let resized = imageops::resize(&premultiplied, target_width, target_height, filter);
    Ok(Bitmap::from_image(from_premultiplied16(&resized)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Color;
    use image::{Rgba, RgbaImage};

    fn two_tone(width: u32, height: u32) -> Bitmap {
        Bitmap::from_image(RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }))
    }

    #[test]
    fn test_stretch_to_target() {
        let bitmap = two_tone(10, 10);
        let resized = resize(&bitmap, Size::new(40.0, 5.0), Quality::Low).unwrap();
        assert_eq!(resized.dimensions(), (40, 5));
    }

    #[test]
    fn test_nearest_keeps_hard_edges() {
        let bitmap = two_tone(4, 4);
        let resized = resize(&bitmap, Size::new(16.0, 16.0), Quality::None).unwrap();
        assert_eq!(resized.pixel(7, 3), Some(Color::BLACK));
        assert_eq!(resized.pixel(8, 3), Some(Color::WHITE));
        assert!(
            resized
                .as_raw()
                .iter()
                .all(|&channel| channel == 0 || channel == 255)
        );
    }

    #[test]
    fn test_degenerate_sizes_rejected() {
        let bitmap = two_tone(4, 4);
        for size in [
            Size::new(0.0, 4.0),
            Size::new(4.0, 0.0),
            Size::new(-4.0, 4.0),
            Size::new(4.0, -1.0),
            Size::new(f64::NAN, 4.0),
        ] {
            let err = resize(&bitmap, size, Quality::High).unwrap_err();
            assert!(matches!(err.reason(), Unavailable::DegenerateSize { .. }));
        }
    }

    #[test]
    fn test_empty_source_rejected() {
        let bitmap = Bitmap::from_image(RgbaImage::new(0, 0));
        let err = resize(&bitmap, Size::new(4.0, 4.0), Quality::Low).unwrap_err();
        assert_eq!(err.reason(), &Unavailable::EmptySource);
    }

    #[test]
    fn test_oversized_target_rejected() {
        let bitmap = two_tone(4, 4);
        let err = resize(&bitmap, Size::new(1e6, 1e6), Quality::Low).unwrap_err();
        assert!(matches!(
            err.reason(),
            Unavailable::ContextAllocation { .. }
        ));
    }

    #[test]
    fn test_huge_target_is_allocation_failure() {
        let bitmap = two_tone(4, 4);
        for size in [Size::new(5.0e9, 1.0), Size::new(1.0e300, 1.0e300)] {
            let err = resize(&bitmap, size, Quality::None).unwrap_err();
            assert!(
                matches!(err.reason(), Unavailable::ContextAllocation { .. }),
                "{size:?}"
            );
        }
    }

    #[test]
    fn test_transparent_neighbours_do_not_tint() {
        // Opaque red next to transparent black
        let bitmap = Bitmap::from_image(RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        }));
        for quality in [Quality::Low, Quality::Medium, Quality::High] {
            let resized = resize(&bitmap, Size::new(8.0, 1.0), quality).unwrap();
            let mut saw_partial = false;
            for x in 0..8 {
                let px = resized.pixel(x, 0).unwrap();
                if px.a > 0 {
                    assert_eq!((px.r, px.g, px.b), (255, 0, 0), "{quality:?} x={x}");
                }
                saw_partial |= px.a > 0 && px.a < 255;
            }
            assert!(saw_partial, "{quality:?}");
        }
    }

    #[test]
    fn test_filter_mapping() {
        assert_eq!(filter_for(Quality::None), FilterType::Nearest);
        assert_eq!(filter_for(Quality::Default), filter_for(Quality::Low));
        assert_eq!(filter_for(Quality::High), FilterType::Lanczos3);
    }
}
