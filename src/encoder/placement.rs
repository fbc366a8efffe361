/// Zig-zag placement of the codeword stream into the symbol
use crate::encoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Write `codewords` MSB-first into the data modules, two columns at a time
/// from the bottom-right corner, alternating upward and downward and
/// skipping the vertical timing column. Modules past the end of the stream
/// (remainder bits) stay light. Returns the number of data modules visited.
pub fn place_codewords(matrix: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) -> usize {
    let dimension = matrix.width();
    let total_bits = codewords.len() * 8;
    let mut bit_idx = 0;

    let mut upward = true;
    let mut col = dimension as isize - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for x in [col as usize, col as usize - 1] {
                if func.is_function(x, row) {
                    continue;
                }
                let dark = bit_idx < total_bits
                    && (codewords[bit_idx / 8] >> (7 - bit_idx % 8)) & 1 == 1;
                matrix.set(x, row, dark);
                bit_idx += 1;
            }
        }

        upward = !upward;
        col -= 2;
    }

    bit_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_first_codeword_fills_bottom_right() {
        let version = Version::MIN;
        let (func, mut matrix) = FunctionMask::draw(version);
        let mut codewords = vec![0u8; 26];
        codewords[0] = 0b1010_0000;

        let visited = place_codewords(&mut matrix, &func, &codewords);
        assert_eq!(visited, 208);

        // Bits 0..4 of the stream: (20,20) (19,20) (20,19) (19,19)
        assert!(matrix.get(20, 20));
        assert!(!matrix.get(19, 20));
        assert!(matrix.get(20, 19));
        assert!(!matrix.get(19, 19));
    }

    #[test]
    fn test_remainder_bits_stay_light() {
        let version = Version::new(2).unwrap();
        let (func, mut matrix) = FunctionMask::draw(version);
        let before = matrix.count_dark();

        // 44 codewords of all ones leave 7 remainder modules light
        let visited = place_codewords(&mut matrix, &func, &[0xFF; 44]);
        assert_eq!(visited, 359);
        assert_eq!(matrix.count_dark(), before + 44 * 8);
    }
}
