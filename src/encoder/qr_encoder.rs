//! QR symbol construction
//!
//! Pipeline: pick the smallest version that fits, build the data codewords,
//! split into blocks and append Reed-Solomon codewords, interleave, place
//! in zig-zag order, then choose the mask with the lowest penalty.

use rayon::prelude::*;

use crate::encoder::bch::format_bits;
use crate::encoder::function_mask::{FunctionMask, place_format_bits};
use crate::encoder::mask::{apply_mask, penalty_score};
use crate::encoder::placement::place_codewords;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::segment::{BitBuffer, Segment};
use crate::encoder::tables::{data_codewords, ec_block_info, total_codewords};
use crate::error::{Result, Unavailable};
use crate::models::{BitMatrix, ECLevel, MaskPattern, QrSymbol, Version};

const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Encodes byte payloads into QR symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrEncoder {
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl QrEncoder {
    /// Encoder at the given error correction level, automatic mask
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            mask: None,
        }
    }

    /// Force a mask instead of scoring all eight
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Configured error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Encode `data` into the smallest symbol that holds it
    pub fn encode(&self, data: &[u8]) -> Result<QrSymbol> {
        let segment = Segment::analyze(data);
        let Some(version) = self.fit_version(&segment) else {
            let capacity = segment
                .mode()
                .max_chars(Version::MAX, data_codewords(Version::MAX, self.ec_level) * 8);
            return Err(Unavailable::PayloadTooLarge {
                len: data.len(),
                capacity,
                ec_level: self.ec_level,
            }
            .into());
        };

        let data_words = self.data_codewords(&segment, version);
        let codewords = add_ec_and_interleave(&data_words, version, self.ec_level);

        let (func, mut modules) = FunctionMask::draw(version);
        place_codewords(&mut modules, &func, &codewords);

        let mask_pattern = match self.mask {
            Some(mask) => mask,
            None => self.best_mask(&modules, &func),
        };
        apply_mask(&mut modules, mask_pattern, &func);
        place_format_bits(&mut modules, format_bits(self.ec_level, mask_pattern));

        tracing::debug!(
            version = version.number(),
            mode = ?segment.mode(),
            ec_level = ?self.ec_level,
            mask = mask_pattern.bits(),
            len = data.len(),
            "encoded QR symbol"
        );

        Ok(QrSymbol {
            version,
            error_correction: self.ec_level,
            mask_pattern,
            modules,
        })
    }

    fn fit_version(&self, segment: &Segment<'_>) -> Option<Version> {
        Version::all().find(|&version| {
            segment
                .bit_len(version)
                .is_some_and(|bits| bits <= data_codewords(version, self.ec_level) * 8)
        })
    }

    /// Segment bits, terminator, byte alignment and pad codewords
    fn data_codewords(&self, segment: &Segment<'_>, version: Version) -> Vec<u8> {
        let capacity_bits = data_codewords(version, self.ec_level) * 8;
        let mut buf = BitBuffer::with_capacity(capacity_bits);
        segment.write(version, &mut buf);

        let terminator = (capacity_bits - buf.bit_count()).min(4);
        buf.push_bits(0, terminator);
        buf.push_bits(0, (8 - buf.bit_count() % 8) % 8);

        let mut words = buf.to_bytes();
        let capacity = capacity_bits / 8;
        let mut pad = PAD_CODEWORDS.iter().cycle();
        while words.len() < capacity {
            words.extend(pad.next());
        }
        words
    }

    fn best_mask(&self, modules: &BitMatrix, func: &FunctionMask) -> MaskPattern {
        let scored = MaskPattern::ALL
            .par_iter()
            .map(|&mask| {
                let mut candidate = modules.clone();
                apply_mask(&mut candidate, mask, func);
                place_format_bits(&mut candidate, format_bits(self.ec_level, mask));
                (penalty_score(&candidate), mask)
            })
            .collect::<Vec<_>>();

        for (score, mask) in &scored {
            tracing::trace!(mask = mask.bits(), score, "mask penalty");
        }

        scored
            .into_iter()
            .min_by_key(|&(score, mask)| (score, mask.bits()))
            .map(|(_, mask)| mask)
            .unwrap_or(MaskPattern::Pattern0)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(crate::config::qr_ec_level())
    }
}

/// Split data into RS blocks, append EC codewords, and interleave
fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let raw_codewords = total_codewords(version);
    let num_short_blocks = info.num_blocks - raw_codewords % info.num_blocks;
    let short_block_len = raw_codewords / info.num_blocks;
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_block_len - info.ecc_per_block + usize::from(i >= num_short_blocks);
        let block = &data[offset..offset + len];
        offset += len;
        blocks.push((block, rs.encode(block)));
    }
    debug_assert_eq!(offset, data.len());

    let longest = blocks.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    let mut result = Vec::with_capacity(raw_codewords);
    for i in 0..longest {
        result.extend(blocks.iter().filter_map(|(d, _)| d.get(i)));
    }
    for i in 0..info.ecc_per_block {
        result.extend(blocks.iter().map(|(_, ecc)| ecc[i]));
    }
    debug_assert_eq!(result.len(), raw_codewords);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::data_codewords;

    #[test]
    fn test_smallest_version_chosen() {
        let encoder = QrEncoder::new(ECLevel::L);
        assert_eq!(encoder.encode(b"00000000").unwrap().version, Version::MIN);
        // 17 bytes is the byte-mode limit of 1-L
        let symbol = encoder.encode(&[b'a'; 17]).unwrap();
        assert_eq!(symbol.version.number(), 1);
        let symbol = encoder.encode(&[b'a'; 18]).unwrap();
        assert_eq!(symbol.version.number(), 2);
    }

    #[test]
    fn test_higher_level_needs_bigger_symbol() {
        let data = b"litecoin:LQTpS3VaYTjCr4s9Y1t5zbeY26zevf7Fb3?amount=1.5";
        let low = QrEncoder::new(ECLevel::L).encode(data).unwrap();
        let high = QrEncoder::new(ECLevel::H).encode(data).unwrap();
        assert!(high.version > low.version);
        assert_eq!(high.error_correction, ECLevel::H);
    }

    #[test]
    fn test_capacity_limit() {
        let encoder = QrEncoder::new(ECLevel::L);
        let symbol = encoder.encode(&[0xA5; 2953]).unwrap();
        assert_eq!(symbol.version, Version::MAX);
        assert_eq!(symbol.size(), 177);

        let err = encoder.encode(&[0xA5; 2954]).unwrap_err();
        assert_eq!(
            err.reason(),
            &Unavailable::PayloadTooLarge {
                len: 2954,
                capacity: 2953,
                ec_level: ECLevel::L
            }
        );
    }

    #[test]
    fn test_data_codewords_padding() {
        let encoder = QrEncoder::new(ECLevel::M);
        let segment = Segment::analyze(b"01234567");
        let words = encoder.data_codewords(&segment, Version::MIN);
        assert_eq!(
            words,
            vec![
                0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
                0x11, 0xEC, 0x11
            ]
        );
    }

    #[test]
    fn test_interleaved_blocks_verify() {
        // 5-Q: two blocks of 15 and two of 16 data codewords, 18 EC each
        let version = Version::new(5).unwrap();
        let n = data_codewords(version, ECLevel::Q);
        assert_eq!(n, 62);
        let data: Vec<u8> = (0..n as u8).collect();
        let stream = add_ec_and_interleave(&data, version, ECLevel::Q);
        assert_eq!(stream.len(), 134);

        // De-interleave: short blocks miss the last data column
        let lens = [15, 15, 16, 16];
        let mut blocks: Vec<Vec<u8>> = vec![Vec::new(); 4];
        let mut idx = 0;
        for i in 0..16 {
            for (b, &len) in lens.iter().enumerate() {
                if i < len {
                    blocks[b].push(stream[idx]);
                    idx += 1;
                }
            }
        }
        for _ in 0..18 {
            for block in blocks.iter_mut() {
                block.push(stream[idx]);
                idx += 1;
            }
        }
        assert_eq!(&blocks[0][..15], &data[..15]);
        assert_eq!(&blocks[3][..16], &data[46..]);

        let rs = ReedSolomonEncoder::new(18);
        assert!(blocks.iter().all(|b| rs.verify(b)));
    }

    #[test]
    fn test_forced_mask_and_determinism() {
        let data = b"litecoin:LQTpS3VaYTjCr4s9Y1t5zbeY26zevf7Fb3";
        let forced = QrEncoder::new(ECLevel::M)
            .with_mask(MaskPattern::Pattern3)
            .encode(data)
            .unwrap();
        assert_eq!(forced.mask_pattern, MaskPattern::Pattern3);

        let a = QrEncoder::new(ECLevel::M).encode(data).unwrap();
        let b = QrEncoder::new(ECLevel::M).encode(data).unwrap();
        assert_eq!(a.modules, b.modules);
        assert_eq!(a.mask_pattern, b.mask_pattern);
    }

    #[test]
    fn test_format_bits_readable_from_both_copies() {
        let symbol = QrEncoder::new(ECLevel::L)
            .with_mask(MaskPattern::Pattern0)
            .encode(b"00000000")
            .unwrap();
        let size = symbol.size();
        let expected = format_bits(ECLevel::L, MaskPattern::Pattern0);

        // Second copy: bits 0..8 along row 8 from the right edge
        let mut copy = 0u16;
        for i in 0..8 {
            copy |= (symbol.is_dark(size - 1 - i, 8) as u16) << i;
        }
        for i in 8..15 {
            copy |= (symbol.is_dark(8, size - 15 + i) as u16) << i;
        }
        assert_eq!(copy, expected);
    }
}
