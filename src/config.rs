//! Process-wide defaults, read once from the environment
//!
//! Unset or unparsable variables fall back to the built-in default.

use std::sync::OnceLock;

use crate::models::ECLevel;

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

static QR_EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

/// Default QR error correction level (`WALLET_IMAGING_QR_EC_LEVEL`)
pub fn qr_ec_level() -> ECLevel {
    *QR_EC_LEVEL.get_or_init(|| parse_env("WALLET_IMAGING_QR_EC_LEVEL").unwrap_or(ECLevel::L))
}

static QR_QUIET_ZONE: OnceLock<u32> = OnceLock::new();

/// Default quiet zone in modules (`WALLET_IMAGING_QR_QUIET_ZONE`)
pub fn qr_quiet_zone() -> u32 {
    *QR_QUIET_ZONE.get_or_init(|| {
        parse_env::<u32>("WALLET_IMAGING_QR_QUIET_ZONE")
            .unwrap_or(0)
            .min(16)
    })
}

static MAX_PIXELS: OnceLock<u64> = OnceLock::new();

/// Largest raster a resize may allocate (`WALLET_IMAGING_MAX_PIXELS`)
pub fn max_pixels() -> u64 {
    *MAX_PIXELS.get_or_init(|| {
        parse_env::<u64>("WALLET_IMAGING_MAX_PIXELS")
            .unwrap_or(100_000_000)
            .max(1)
    })
}

static MAX_BLUR_RADIUS: OnceLock<f32> = OnceLock::new();

/// Largest accepted blur radius (`WALLET_IMAGING_MAX_BLUR_RADIUS`)
pub fn max_blur_radius() -> f32 {
    *MAX_BLUR_RADIUS.get_or_init(|| {
        parse_env::<f32>("WALLET_IMAGING_MAX_BLUR_RADIUS")
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(256.0)
    })
}
