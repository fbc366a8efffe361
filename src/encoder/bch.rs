/// BCH codes protecting the format and version information
use crate::models::{ECLevel, MaskPattern, Version};

// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u16 = 0x5412;
// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data << degree` modulo `generator`
fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data;
    for _ in 0..degree {
        rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
    }
    rem & ((1 << degree) - 1)
}

/// 15-bit format information: 2 level bits, 3 mask bits, 10 BCH bits, XOR-masked
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_bits() as u32) << 3) | mask.bits() as u32;
    let rem = bch_remainder(data, FORMAT_GENERATOR, 10);
    ((data << 10 | rem) as u16) ^ FORMAT_XOR_MASK
}

/// 18-bit version information, present from version 7 upwards
pub fn version_bits(version: Version) -> Option<u32> {
    if version.number() < 7 {
        return None;
    }
    let data = version.number() as u32;
    Some(data << 12 | bch_remainder(data, VERSION_GENERATOR, 12))
}
