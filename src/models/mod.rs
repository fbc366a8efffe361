pub mod bitmap;
pub mod color;
pub mod matrix;
pub mod qr_code;
pub mod size;

pub use bitmap::Bitmap;
pub use color::{Color, ParseColorError};
pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, MaskPattern, QrSymbol, Version};
pub use size::{Quality, Size};
