//! BARCH is a lossless compression codec for 8-bit grayscale bitmaps.
//!
//! The codec is built around two observations about scanned, document-like
//! images: most rows are entirely white, and non-white rows are dominated by
//! runs of identical white or black pixels. Rows that are all white are
//! recorded with a single bit in a row lookup table and contribute nothing to
//! the payload. The remaining rows are cut into blocks of four pixels and
//! prefix-coded: `0` for a white block, `10` for a black block, `11` followed
//! by the 32 raw block bits for anything else.
//!
//! [`compress`] and [`uncompress`] convert between [`Bitmap`] and
//! [`CompressedBitmap`]; [`CompressedBitmap::save`] and
//! [`CompressedBitmap::load`] move the compressed form through any byte sink
//! or source.

pub mod bitmap;
pub mod bitset;
pub mod coding;
pub mod compression;
pub mod error;

pub use bitmap::{Bitmap, BitmapSize};
pub use compression::{compress, uncompress, CompressedBitmap};
pub use error::Error;

/// A shade of gray in the range `[0, 256)`.
pub type Pixel = u8;

pub const WHITE: Pixel = 0xFF;
pub const BLACK: Pixel = 0x00;
