use thiserror::Error;

use crate::models::ECLevel;

/// Why a transformation could not produce an image
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Unavailable {
    /// No QR version up to 40 holds the payload at the requested level
    #[error("payload of {len} bytes exceeds QR capacity of {capacity} bytes at level {ec_level:?}")]
    PayloadTooLarge {
        /// Payload length in bytes
        len: usize,
        /// Most characters of the payload's mode at version 40
        capacity: usize,
        /// Requested error correction level
        ec_level: ECLevel,
    },
    /// Target width or height is zero, negative, or not finite
    #[error("degenerate target size {width}x{height}")]
    DegenerateSize {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },
    /// Target raster is larger than the configured pixel ceiling
    #[error("cannot allocate a {width}x{height} drawing context")]
    ContextAllocation {
        /// Target width in pixels
        width: u64,
        /// Target height in pixels
        height: u64,
    },
    /// Blur radius is negative or not finite
    #[error("invalid blur radius {0}")]
    InvalidRadius(f32),
    /// Blur radius is valid but above the configured maximum
    #[error("blur radius {radius} exceeds the supported maximum of {max}")]
    FilterUnavailable {
        /// Requested radius
        radius: f32,
        /// Configured maximum radius
        max: f32,
    },
    /// Source bitmap has no pixels
    #[error("source bitmap is empty")]
    EmptySource,
    /// Raw pixel buffer length does not match its dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    MalformedBuffer {
        /// Bytes implied by width x height x 4
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// The single failure kind of this crate: the transformation is unavailable.
///
/// The reason is kept for diagnostics only; callers are expected to treat
/// every `ImageError` the same way (skip rendering, show a placeholder).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("transformation unavailable: {reason}")]
pub struct ImageError {
    reason: Unavailable,
}

impl ImageError {
    /// Diagnostic reason for the failure
    pub fn reason(&self) -> &Unavailable {
        &self.reason
    }
}

impl From<Unavailable> for ImageError {
    fn from(reason: Unavailable) -> Self {
        tracing::debug!(%reason, "image transformation unavailable");
        Self { reason }
    }
}

/// Result alias used by every image operation
pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_carries_reason() {
        let err = ImageError::from(Unavailable::InvalidRadius(-1.0));
        assert_eq!(err.to_string(), "transformation unavailable: invalid blur radius -1");
        assert_eq!(err.reason(), &Unavailable::InvalidRadius(-1.0));
    }

    #[test]
    fn test_payload_message() {
        let err = ImageError::from(Unavailable::PayloadTooLarge {
            len: 3000,
            capacity: 2953,
            ec_level: ECLevel::L,
        });
        assert!(err.to_string().contains("3000 bytes"));
        assert!(err.to_string().contains("2953"));
    }
}
