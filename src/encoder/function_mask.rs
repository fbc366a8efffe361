use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

/// Modules under construction plus the record of which ones are fixed
struct Canvas {
    modules: BitMatrix,
    function: BitMatrix,
}

impl Canvas {
    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.function.set(x, y, true);
    }
}

impl FunctionMask {
    /// Draw every function pattern of `version`.
    ///
    /// Returns the reservation mask and a module matrix holding finders,
    /// separators, timing, alignment, the dark module and version info. The
    /// format areas are reserved but left light until a mask is chosen.
    pub fn draw(version: Version) -> (Self, BitMatrix) {
        let size = version.size();
        let mut canvas = Canvas {
            modules: BitMatrix::square(size),
            function: BitMatrix::square(size),
        };

        // Timing patterns (row 6 and column 6); finders overwrite the ends
        for i in 0..size {
            canvas.set_function(6, i, i % 2 == 0);
            canvas.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns + separators
        Self::draw_finder(&mut canvas, 3, 3);
        Self::draw_finder(&mut canvas, size - 4, 3);
        Self::draw_finder(&mut canvas, 3, size - 4);

        // Alignment patterns, skipping the three finder corners
        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                Self::draw_alignment(&mut canvas, cx, cy);
            }
        }

        // Format info areas (placeholder, real bits drawn after masking)
        place_format_bits(&mut canvas.modules, 0);
        for i in 0..9 {
            canvas.function.set(8, i, true);
            canvas.function.set(i, 8, true);
        }
        for i in 0..8 {
            canvas.function.set(size - 1 - i, 8, true);
            canvas.function.set(8, size - 1 - i, true);
        }

        // Version info (v7+)
        if let Some(bits) = super::bch::version_bits(version) {
            for i in 0..18 {
                let dark = (bits >> i) & 1 == 1;
                let a = size - 11 + i % 3;
                let b = i / 3;
                canvas.set_function(a, b, dark);
                canvas.set_function(b, a, dark);
            }
        }

        (
            Self {
                mask: canvas.function,
            },
            canvas.modules,
        )
    }

    /// Reservation mask only
    pub fn new(version: Version) -> Self {
        Self::draw(version).0
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_dark()
    }

    fn draw_finder(canvas: &mut Canvas, cx: usize, cy: usize) {
        let size = canvas.modules.width() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                canvas.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    fn draw_alignment(canvas: &mut Canvas, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let dist = dx.abs().max(dy.abs());
                canvas.set_function(
                    (cx as isize + dx) as usize,
                    (cy as isize + dy) as usize,
                    dist != 1,
                );
            }
        }
    }
}

/// Write both copies of the 15-bit format information and the dark module
pub fn place_format_bits(modules: &mut BitMatrix, bits: u16) {
    let size = modules.width();
    let bit = |i: usize| (bits >> i) & 1 == 1;

    // Around the top-left finder
    for i in 0..=5 {
        modules.set(8, i, bit(i));
    }
    modules.set(8, 7, bit(6));
    modules.set(8, 8, bit(7));
    modules.set(7, 8, bit(8));
    for i in 9..15 {
        modules.set(14 - i, 8, bit(i));
    }

    // Split between the top-right and bottom-left finders
    for i in 0..8 {
        modules.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        modules.set(8, size - 15 + i, bit(i));
    }

    // Dark module
    modules.set(8, size - 8, true);
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;
    let size = version.size();

    let mut positions: Vec<usize> = (0..num_align - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}
