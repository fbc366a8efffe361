/// Packed module grid for a QR symbol (true = dark module)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Create an all-light square matrix (QR symbols are always square)
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Matrix width in modules
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in modules
    pub fn height(&self) -> usize {
        self.height
    }

    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some((index / 8, 1 << (index % 8)))
    }

    /// Module at column `x`, row `y`. Out-of-range reads are light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.locate(x, y) {
            Some((byte, bit)) => self.data[byte] & bit != 0,
            None => false,
        }
    }

    /// Set module at column `x`, row `y`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((byte, bit)) = self.locate(x, y) {
            if value {
                self.data[byte] |= bit;
            } else {
                self.data[byte] &= !bit;
            }
        }
    }

    /// Flip module at column `x`, row `y`
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some((byte, bit)) = self.locate(x, y) {
            self.data[byte] ^= bit;
        }
    }

    /// Number of dark modules
    pub fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate one row as booleans
    pub fn row(&self, y: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).map(move |x| self.get(x, y))
    }

    /// Iterate one column as booleans
    pub fn column(&self, x: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.height).map(move |y| self.get(x, y))
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
