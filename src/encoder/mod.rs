//! QR code encoding modules
//!
//! This module contains everything needed to turn a payload into a module matrix:
//! - Mode selection and bit packing (numeric, alphanumeric, byte)
//! - Reed-Solomon codewords and block interleaving
//! - Function patterns, format and version information (BCH)
//! - Zig-zag placement and mask selection

/// BCH codes for format and version info
pub mod bch;
/// Function pattern drawing (finder/timing/alignment/format/version)
pub mod function_mask;
/// Mask application and penalty scoring
pub mod mask;
/// Codeword placement into the module matrix
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Data segments and the bit buffer
pub mod segment;
/// QR specification tables (ECC codewords/blocks, capacities)
pub mod tables;

pub use qr_encoder::QrEncoder;
