
//! Bit level reading and writing on top of byte streams.
//! Bits are collected in a buffer word and the word is transferred as a whole.
//! Within a word, the first bit is the least significant one.

use crate::io::{Data, Read, Write};
use crate::error::IoResult;


/// An unsigned integer that buffers bits.
pub trait Word: Data + Eq + std::fmt::Debug {

    /// Number of bits per word.
    const BITS: usize;

    /// Return a copy of this word with the bit at `index` set to one.
    fn with_bit(self, index: usize) -> Self;

    /// Whether the bit at `index` is one.
    fn bit(self, index: usize) -> bool;
}

macro_rules! implement_word_for_primitive {
    ($kind: ident) => {
        impl Word for $kind {
            const BITS: usize = <$kind>::BITS as usize;

            #[inline]
            fn with_bit(self, index: usize) -> Self {
                debug_assert!(index < <Self as Word>::BITS, "bit index bug");
                self | (1 << index)
            }

            #[inline]
            fn bit(self, index: usize) -> bool {
                debug_assert!(index < <Self as Word>::BITS, "bit index bug");
                (self >> index) & 1 == 1
            }
        }
    };
}

implement_word_for_primitive!(u8);
implement_word_for_primitive!(u16);
implement_word_for_primitive!(u32);
implement_word_for_primitive!(u64);


/// Collects single bits and writes them to the byte stream word by word.
///
/// Bits that do not fill a complete word are only written by `flush`.
/// There is no flush on drop: the writer cannot report errors while dropping,
/// so the owner must call `flush` at the end of each section.
#[derive(Debug)]
pub struct BitWriter<'w, W, Out> {
    out: &'w mut Out,
    buffer: W,
    buffered_bits: usize,
}

impl<'w, W: Word, Out: Write> BitWriter<'w, W, Out> {

    /// Start with an empty buffer.
    pub fn new(out: &'w mut Out) -> Self {
        BitWriter { out, buffer: W::default(), buffered_bits: 0 }
    }

    /// Append one bit. Writes the buffer word if it is full afterwards.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> IoResult<()> {
        if bit {
            self.buffer = self.buffer.with_bit(self.buffered_bits);
        }

        self.buffered_bits += 1;

        if self.buffered_bits == W::BITS {
            self.flush()?;
        }

        Ok(())
    }

    /// Append all bits in order.
    pub fn write_bits(&mut self, bits: impl IntoIterator<Item = bool>) -> IoResult<()> {
        for bit in bits {
            self.write_bit(bit)?;
        }

        Ok(())
    }

    /// Write a partially filled word, padded with zeroes in the unused high bits.
    /// Does nothing if no bits are buffered.
    pub fn flush(&mut self) -> IoResult<()> {
        if self.buffered_bits > 0 {
            self.buffer.write(&mut *self.out)?;
            self.buffer = W::default();
            self.buffered_bits = 0;
        }

        Ok(())
    }

    /// Number of bits that `flush` would still write.
    pub fn pending_bits(&self) -> usize {
        self.buffered_bits
    }
}


/// Reads bits from a byte stream, fetching one word at a time when needed.
/// Padding bits are not detected, the caller must know how many bits to read.
#[derive(Debug)]
pub struct BitReader<'r, W, In> {
    read: &'r mut In,
    buffer: W,
    next_bit: usize,
}

impl<'r, W: Word, In: Read> BitReader<'r, W, In> {

    /// No word is read before the first bit is requested.
    pub fn new(read: &'r mut In) -> Self {
        BitReader { read, buffer: W::default(), next_bit: W::BITS }
    }

    /// Return the next bit.
    /// Fails with `UnexpectedEof` if the stream ends before a complete word could be read.
    #[inline]
    pub fn read_bit(&mut self) -> IoResult<bool> {
        if self.next_bit == W::BITS {
            self.buffer = W::read(&mut *self.read)?;
            self.next_bit = 0;
        }

        let bit = self.buffer.bit(self.next_bit);
        self.next_bit += 1;
        Ok(bit)
    }
}
