//! The BARCH container format.
//!
//! A saved bitmap is a sequence of 64-bit little-endian words:
//!
//! ```text
//! offset (words)   field
//!   0              width
//!   1              height
//!   2              row lookup table (one word per 64 rows, rounded up)
//!   2 + L          pixel data word count N
//!   3 + L          pixel data (N words)
//! ```
//!
//! Within a word the stream bits are MSB-first: bit 0 of the encoded stream
//! is the most significant bit of the first pixel-data word.

use super::CompressedBitmap;
use crate::bitmap::BitmapSize;
use crate::bitset::{BitSet, Word, WORD_BITS};
use crate::error::{Error, SizeError};
use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, Read, Write};

const WORD_BYTES: usize = std::mem::size_of::<Word>();

impl CompressedBitmap {
    /// Writes the bitmap to `to` in the container format above.
    pub fn save<W>(&self, mut to: W) -> Result<(), Error>
    where
        W: Write,
    {
        write_word(&mut to, self.width() as Word)?;
        write_word(&mut to, self.height() as Word)?;
        write_words(&mut to, self.row_lookup_table.words())?;
        // The pixel data word count is stored explicitly; the lookup table
        // word count is implied by the height.
        write_word(&mut to, self.pixel_data.word_count() as Word)?;
        write_words(&mut to, self.pixel_data.words())?;
        Ok(())
    }

    /// Reads a bitmap previously written by [`save`](CompressedBitmap::save).
    ///
    /// The dimensions are validated before anything else is read, and both
    /// word vectors are sized exactly from the header: the lookup table from
    /// the height, the pixel data from its stored word count. A count of zero
    /// pixel-data words is valid and loads as an empty payload.
    pub fn load<R>(mut from: R) -> Result<CompressedBitmap, Error>
    where
        R: Read,
    {
        let width = to_usize(read_word(&mut from)?)?;
        let height = to_usize(read_word(&mut from)?)?;
        let size = BitmapSize::new(width, height)?;

        let lookup_word_count = (height + WORD_BITS - 1) / WORD_BITS;
        let row_lookup_table = BitSet::from_words(read_words(&mut from, lookup_word_count)?);

        let pixel_data_word_count = to_usize(read_word(&mut from)?)?;
        let pixel_data = BitSet::from_words(read_words(&mut from, pixel_data_word_count)?);

        Ok(CompressedBitmap {
            size,
            row_lookup_table,
            pixel_data,
        })
    }
}

fn to_usize(word: Word) -> Result<usize, Error> {
    usize::try_from(word).map_err(|_| Error::InvalidSize(SizeError::TooLarge))
}

fn write_word<W>(to: &mut W, word: Word) -> Result<(), Error>
where
    W: Write,
{
    let mut buf = [0u8; WORD_BYTES];
    LittleEndian::write_u64(&mut buf, word);

    let mut written = 0;
    while written < WORD_BYTES {
        match to.write(&buf[written..]) {
            Ok(0) => {
                return Err(Error::WriteFailed {
                    requested: WORD_BYTES,
                    written,
                })
            }
            Ok(count) => written += count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        }
    }
    Ok(())
}

fn write_words<W>(to: &mut W, words: &[Word]) -> Result<(), Error>
where
    W: Write,
{
    for &word in words {
        write_word(to, word)?;
    }
    Ok(())
}

fn read_word<R>(from: &mut R) -> Result<Word, Error>
where
    R: Read,
{
    let mut buf = [0u8; WORD_BYTES];

    let mut read = 0;
    while read < WORD_BYTES {
        match from.read(&mut buf[read..]) {
            Ok(0) => {
                return Err(Error::ShortRead {
                    requested: WORD_BYTES,
                    read,
                })
            }
            Ok(count) => read += count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        }
    }
    Ok(LittleEndian::read_u64(&buf))
}

fn read_words<R>(from: &mut R, count: usize) -> Result<Vec<Word>, Error>
where
    R: Read,
{
    let mut words = Vec::new();
    // Reserve fallibly, so a hostile word count fails cleanly instead of
    // aborting the process.
    words
        .try_reserve_exact(count)
        .map_err(|_| Error::InvalidSize(SizeError::TooLarge))?;
    for _ in 0..count {
        words.push(read_word(from)?);
    }
    Ok(words)
}
