//! The pixel-block bitstream codec.
//!
//! Pixels are consumed four at a time and every block is prefix-coded into a
//! [`BitSet`]: `0` for an all-white block, `10` for an all-black block, `11`
//! followed by the 32 block bits MSB-first for anything else. The code is not
//! self-terminating; the decoder stops once the caller-supplied output is
//! full.

use crate::bitset::BitSet;
use crate::{Pixel, BLACK};

pub mod pixel_block;

use pixel_block::{combine, split, PixelBlock, BLACK_BLOCK, WHITE_BLOCK};

/// Encodes pixels into a stream of bits.
///
/// The encoder owns a bit cursor starting at 0 and borrows its output for the
/// whole coding session, so consecutive [`encode`](Encoder::encode) calls
/// concatenate their bits seamlessly.
pub struct Encoder<'a> {
    output: &'a mut BitSet,
    index: usize,
}

impl<'a> Encoder<'a> {
    pub fn new(output: &'a mut BitSet) -> Encoder<'a> {
        Encoder { output, index: 0 }
    }

    /// Appends the encoded representation of `pixels` to the output.
    ///
    /// Pixels are grouped into blocks of four; a trailing group of 1-3 pixels
    /// is padded with black to fill the final block. The decoder discards the
    /// padding, so only the emitted bits observe the padding value.
    pub fn encode(&mut self, pixels: &[Pixel]) {
        let mut blocks = pixels.chunks_exact(4);
        for block in &mut blocks {
            self.write_block(combine(block[0], block[1], block[2], block[3]));
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            let mut padded = [BLACK; 4];
            padded[..tail.len()].copy_from_slice(tail);
            self.write_block(combine(padded[0], padded[1], padded[2], padded[3]));
        }
    }

    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.output.set(self.index);
        } else {
            self.output.clear(self.index);
        }
        self.index += 1;
    }

    fn write_block(&mut self, block: PixelBlock) {
        if block == WHITE_BLOCK {
            self.write_bit(false);
            return;
        }
        if block == BLACK_BLOCK {
            self.write_bit(true);
            self.write_bit(false);
            return;
        }

        self.write_bit(true);
        self.write_bit(true);
        for bit in (0..u32::BITS).rev() {
            let mask = 1 << bit;
            self.write_bit(block & mask == mask);
        }
    }
}

/// Decodes pixels from a stream of bits. The exact inverse of [`Encoder`].
pub struct Decoder<'a> {
    input: &'a BitSet,
    index: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a BitSet) -> Decoder<'a> {
        Decoder { input, index: 0 }
    }

    /// Fills `pixels` in order, consuming the minimum number of bits.
    ///
    /// A trailing group of 1-3 pixels still decodes a whole block; the unused
    /// padding pixels are dropped. Reading past the written data observes off
    /// bits, which decode as white blocks, so a decode that lands inside a
    /// padding word terminates cleanly.
    pub fn decode(&mut self, pixels: &mut [Pixel]) {
        let mut blocks = pixels.chunks_exact_mut(4);
        for block in &mut blocks {
            block.copy_from_slice(&split(self.read_block()));
        }

        let tail = blocks.into_remainder();
        if !tail.is_empty() {
            let block = split(self.read_block());
            let length = tail.len();
            tail.copy_from_slice(&block[..length]);
        }
    }

    fn read_bit(&mut self) -> bool {
        let bit = self.input.test(self.index);
        self.index += 1;
        bit
    }

    fn read_block(&mut self) -> PixelBlock {
        if !self.read_bit() {
            // Bit pattern: 0
            return WHITE_BLOCK;
        }
        if !self.read_bit() {
            // Bit pattern: 10
            return BLACK_BLOCK;
        }
        // Bit pattern: 11, followed by the raw block bits.
        let mut block = 0;
        for bit in (0..u32::BITS).rev() {
            if self.read_bit() {
                block |= 1 << bit;
            }
        }
        block
    }
}

#[cfg(test)]
mod test {
    use super::{Decoder, Encoder};
    use crate::bitset::BitSet;

    #[test]
    fn test_encode_white_black_and_mixed_blocks() {
        let pixels = [
            0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01,
        ];
        let mut encoded = BitSet::new(0);
        let mut encoder = Encoder::new(&mut encoded);
        encoder.encode(&pixels);

        // 0 (white block), 10 (black block), 11 + the 32 bits of 0x01010101,
        // followed by zero filler up to the word boundary.
        assert_eq!(encoded.word_count(), 1);
        assert_eq!(
            encoded.words()[0],
            0b01011_00000001_00000001_00000001_00000001_000000000000000000000000000
        );
    }

    #[test]
    fn test_decode_white_black_and_mixed_blocks() {
        let stream = "0101100000001000000010000000100000001";
        let mut encoded = BitSet::new(0);
        for (index, bit) in stream.chars().enumerate() {
            if bit == '1' {
                encoded.set(index);
            }
        }

        let mut pixels = [0u8; 12];
        let mut decoder = Decoder::new(&encoded);
        decoder.decode(&mut pixels);
        assert_eq!(
            pixels,
            [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01]
        );
    }

    #[test]
    fn test_single_black_pixel_pads_to_a_black_block() {
        let mut encoded = BitSet::new(0);
        let mut encoder = Encoder::new(&mut encoded);
        encoder.encode(&[0x00]);

        // The tail pads with black, so the whole block is black: 10.
        assert_eq!(encoded.word_count(), 1);
        assert_eq!(encoded.words()[0], 1 << 63);
    }

    #[test]
    fn test_tail_padding_is_discarded_on_decode() {
        for tail_length in 1..4 {
            let pixels: Vec<u8> = (1..=4 + tail_length as u8).collect();
            let mut encoded = BitSet::new(0);
            Encoder::new(&mut encoded).encode(&pixels);

            let mut decoded = vec![0u8; pixels.len()];
            Decoder::new(&encoded).decode(&mut decoded);
            assert_eq!(decoded, pixels);
        }
    }

    #[test]
    fn test_trailing_white_blocks_never_touch_storage() {
        // Clearing bits past the end does not grow the set, so a stream that
        // ends in white blocks occupies no words at all.
        let mut encoded = BitSet::new(0);
        Encoder::new(&mut encoded).encode(&[0xFF; 8]);
        assert_eq!(encoded.word_count(), 0);

        let mut decoded = [0u8; 8];
        Decoder::new(&encoded).decode(&mut decoded);
        assert_eq!(decoded, [0xFF; 8]);
    }

    #[test]
    fn test_cursor_spans_consecutive_encodes() {
        let first = [0x00, 0x00, 0x00, 0x00];
        let second = [0xDE, 0xAD, 0xBE, 0xEF];

        let mut encoded = BitSet::new(0);
        let mut encoder = Encoder::new(&mut encoded);
        encoder.encode(&first);
        encoder.encode(&second);

        let mut decoder = Decoder::new(&encoded);
        let mut decoded = [0u8; 4];
        decoder.decode(&mut decoded);
        assert_eq!(decoded, first);
        decoder.decode(&mut decoded);
        assert_eq!(decoded, second);
    }

    #[test]
    fn test_decoding_past_the_written_data_yields_white() {
        let encoded = BitSet::new(0);
        let mut pixels = [0u8; 11];
        Decoder::new(&encoded).decode(&mut pixels);
        assert_eq!(pixels, [0xFF; 11]);
    }
}
