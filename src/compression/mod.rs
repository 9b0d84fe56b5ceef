//! Whole-image compression: row classification, the compressed container and
//! the drivers that move pixels through the block codec.

use crate::bitmap::{Bitmap, BitmapSize};
use crate::bitset::BitSet;
use crate::coding::{Decoder, Encoder};
use crate::error::{Axis, Error};
use crate::{Pixel, WHITE};

mod format;

/// A bitmap compressed into a row lookup table and a block-coded payload.
///
/// The lookup table holds one bit per row: off for rows that are entirely
/// white, on for everything else. Only the non-empty rows are encoded into
/// the pixel data, concatenated in increasing y order. There is no per-row
/// mutation interface; [`compress`] and [`uncompress`] are the only
/// operations that populate or consume the pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBitmap {
    size: BitmapSize,
    row_lookup_table: BitSet,
    pixel_data: BitSet,
}

impl CompressedBitmap {
    /// Constructs a compressed bitmap with every row empty and no pixel data.
    pub fn new(width: usize, height: usize) -> Result<CompressedBitmap, Error> {
        let size = BitmapSize::new(width, height)?;
        Ok(CompressedBitmap {
            size,
            row_lookup_table: BitSet::new(height),
            pixel_data: BitSet::new(0),
        })
    }

    pub fn width(&self) -> usize {
        self.size.width()
    }

    pub fn height(&self) -> usize {
        self.size.height()
    }

    /// Returns `true` if the row at `y` is entirely white.
    pub fn is_empty_row_at(&self, y: usize) -> Result<bool, Error> {
        if y >= self.height() {
            return Err(Error::InvalidCoordinate(Axis::Y, y));
        }
        Ok(!self.row_lookup_table.test(y))
    }
}

/// Returns `true` if every pixel in the row is white.
fn is_empty(pixels: &[Pixel]) -> bool {
    pixels.iter().all(|&pixel| pixel == WHITE)
}

/// Compresses a bitmap.
///
/// `progress` is invoked with `(y, height)` before each row is examined and
/// once more with `(height, height)` when the image is done, `height + 1`
/// calls in total.
pub fn compress(source: &Bitmap, mut progress: impl FnMut(usize, usize)) -> CompressedBitmap {
    let height = source.height();
    let mut row_lookup_table = BitSet::new(height);
    let mut pixel_data = BitSet::new(0);

    let mut encoder = Encoder::new(&mut pixel_data);
    for (y, row) in source.rows().enumerate() {
        progress(y, height);
        if is_empty(row) {
            // Empty rows are skipped. The corresponding bit in the lookup
            // table stays off.
            continue;
        }
        row_lookup_table.set(y);
        encoder.encode(row);
    }
    progress(height, height);

    CompressedBitmap {
        size: source.size(),
        row_lookup_table,
        pixel_data,
    }
}

/// Reconstructs the original bitmap from its compressed form.
///
/// The output starts out white, so empty rows need no work; only rows marked
/// in the lookup table are decoded. The progress cadence matches
/// [`compress`]. Fails if the output bitmap cannot be allocated.
pub fn uncompress(
    source: &CompressedBitmap,
    mut progress: impl FnMut(usize, usize),
) -> Result<Bitmap, Error> {
    let height = source.height();
    let mut result = Bitmap::new(source.width(), height)?;

    let mut decoder = Decoder::new(&source.pixel_data);
    for y in 0..height {
        progress(y, height);
        if source.row_lookup_table.test(y) {
            decoder.decode(result.row_at_mut(y)?);
        }
    }
    progress(height, height);

    Ok(result)
}
