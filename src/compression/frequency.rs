
//! Count how often each byte value occurs in the input.

use crate::io::{read_chunks, Read};
use crate::error::IoResult;


/// Number of distinct symbols in the alphabet.
pub const SYMBOL_COUNT: usize = 256;


/// How often each byte value occurred.
/// Built once per compression and not modified afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [u64; SYMBOL_COUNT],
}

impl Frequencies {

    /// Consume the whole reader and count every byte.
    /// Returns the counts and the total number of bytes.
    pub fn count(read: &mut impl Read) -> IoResult<(Self, u64)> {
        let mut counts = [0_u64; SYMBOL_COUNT];
        let mut total = 0_u64;

        read_chunks(read, |chunk| {
            for &byte in chunk {
                counts[byte as usize] += 1;
            }

            total += chunk.len() as u64;
            Ok(())
        })?;

        Ok((Frequencies { counts }, total))
    }

    /// Count the bytes of an in-memory slice.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0_u64; SYMBOL_COUNT];

        for &byte in bytes {
            counts[byte as usize] += 1;
        }

        Frequencies { counts }
    }

    /// How often this byte occurred.
    #[inline]
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// The bytes that occurred at least once, with their count, in ascending byte order.
    pub fn occurring(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate()
            .filter(|&(_, &count)| count != 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of byte values that occurred at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }
}

impl std::fmt::Debug for Frequencies {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map().entries(self.occurring()).finish()
    }
}
