/// Data masking and mask penalty scoring
use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

// 1:1:3:1:1 finder-like run with four light modules on one side
const FINDER_LIKE_A: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];
const FINDER_LIKE_B: [bool; 11] = [
    false, false, false, false, true, false, true, true, true, false, true,
];

/// XOR the mask pattern onto every data module. Applying twice is a no-op.
pub fn apply_mask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let width = matrix.width();
    let height = matrix.height();

    for y in 0..height {
        for x in 0..width {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Total penalty of a finished symbol; lower is better
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;

    for i in 0..size {
        let row: Vec<bool> = matrix.row(i).collect();
        let column: Vec<bool> = matrix.column(i).collect();
        score += run_penalty(&row) + run_penalty(&column);
        score += finder_like_penalty(&row) + finder_like_penalty(&column);
    }

    score + block_penalty(matrix) + balance_penalty(matrix)
}

/// Rule 1: five or more same-colored modules in a line
fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 0;
    let mut color = None;
    for &module in line {
        if Some(module) == color {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + (run - 5);
            }
            color = Some(module);
            run = 1;
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + (run - 5);
    }
    score
}

/// Rule 2: every 2x2 block of one color
fn block_penalty(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = matrix.get(x, y);
            if c == matrix.get(x + 1, y) && c == matrix.get(x, y + 1) && c == matrix.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// Rule 3: patterns resembling a finder
fn finder_like_penalty(line: &[bool]) -> u32 {
    line.windows(11)
        .filter(|w| *w == FINDER_LIKE_A || *w == FINDER_LIKE_B)
        .count() as u32
        * PENALTY_N3
}

/// Rule 4: deviation of the dark ratio from 50%, in 5% steps
fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = (matrix.width() * matrix.height()) as i64;
    if total == 0 {
        return 0;
    }
    let dark = matrix.count_dark() as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    k.max(0) as u32 * PENALTY_N4
}
