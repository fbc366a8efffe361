//! Data mode selection and bit packing
//!
//! A payload is encoded as a single segment in the densest mode that can
//! represent every byte of it:
//! - Numeric: digits only, 3 digits per 10 bits
//! - Alphanumeric: `0-9 A-Z space $%*+-./:`, 2 chars per 11 bits
//! - Byte: anything else, 8 bits per byte

use crate::models::Version;

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn alphanumeric_value(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|p| p as u32)
}

/// Segment data mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 0001
    Numeric,
    /// Mode 0010
    Alphanumeric,
    /// Mode 0100
    Byte,
}

impl Mode {
    /// Four-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for this mode at `version`
    pub fn char_count_bits(&self, version: Version) -> usize {
        let tier = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
        }
    }

    /// Most characters a single segment can hold at `version` given
    /// `data_bits` of data capacity
    pub fn max_chars(&self, version: Version, data_bits: usize) -> usize {
        let Some(bits) = data_bits.checked_sub(4 + self.char_count_bits(version)) else {
            return 0;
        };
        let chars = match self {
            Mode::Numeric => {
                let tail = match bits % 10 {
                    7.. => 2,
                    4.. => 1,
                    _ => 0,
                };
                bits / 10 * 3 + tail
            }
            Mode::Alphanumeric => bits / 11 * 2 + usize::from(bits % 11 >= 6),
            Mode::Byte => bits / 8,
        };
        chars.min((1 << self.char_count_bits(version)) - 1)
    }
}

/// Append-only bit sequence, most significant bit first
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `len` bits of `value`
    pub fn push_bits(&mut self, value: u32, len: usize) {
        debug_assert!(len <= 31 && value >> len == 0, "value does not fit in {len} bits");
        for i in (0..len).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    /// Bits written so far
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Pack into bytes; a trailing partial byte is zero-padded
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// A payload paired with the mode it will be written in
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    mode: Mode,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    /// Pick the densest mode able to hold every byte of `data`
    pub fn analyze(data: &'a [u8]) -> Self {
        let mode = if data.iter().all(u8::is_ascii_digit) {
            Mode::Numeric
        } else if data.iter().all(|&b| alphanumeric_value(b).is_some()) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        };
        Self { mode, data }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    fn payload_bits(&self) -> usize {
        let n = self.data.len();
        match self.mode {
            Mode::Numeric => n / 3 * 10 + [0, 4, 7][n % 3],
            Mode::Alphanumeric => n / 2 * 11 + (n % 2) * 6,
            Mode::Byte => n * 8,
        }
    }

    /// Total bits (header + payload) at `version`, `None` if the character
    /// count does not fit the count field
    pub fn bit_len(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        if self.char_count() >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits + self.payload_bits())
    }

    /// Write mode indicator, character count and payload
    pub fn write(&self, version: Version, buf: &mut BitBuffer) {
        buf.push_bits(self.mode.indicator(), 4);
        buf.push_bits(self.char_count() as u32, self.mode.char_count_bits(version));
        match self.mode {
            Mode::Numeric => {
                for chunk in self.data.chunks(3) {
                    let value = chunk
                        .iter()
                        .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
                    buf.push_bits(value, chunk.len() * 3 + 1);
                }
            }
            Mode::Alphanumeric => {
                for pair in self.data.chunks(2) {
                    let values: Vec<u32> = pair.iter().filter_map(|&b| alphanumeric_value(b)).collect();
                    match values.as_slice() {
                        [a, b] => buf.push_bits(a * 45 + b, 11),
                        [a] => buf.push_bits(*a, 6),
                        _ => unreachable!("segment holds only alphanumeric characters"),
                    }
                }
            }
            Mode::Byte => {
                for &byte in self.data {
                    buf.push_bits(byte as u32, 8);
                }
            }
        }
    }
}
