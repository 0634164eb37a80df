
//! Compress and decompress whole byte streams.
//!
//! A compressed stream starts with the code table, see `table`,
//! followed by the number of original bytes and the packed codes of those bytes.
//! There is no magic number and no checksum:
//! damaged streams are detected by checking the structure while reading.

pub mod frequency;
pub mod trie;
pub mod table;

mod encode;
mod decode;

use std::io::{Cursor, Seek, SeekFrom};
use tracing::debug;
use crate::error::{Error, Result, UnitResult};
use crate::io::{Read, Tracking, Write};
use self::frequency::Frequencies;
use self::table::CodeTable;
use self::trie::Trie;


/// Size of the buffer word that the payload bits are packed into.
/// The word size is not stored in the stream:
/// decompression must use the same size as compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {

    /// Pad the payload to whole bytes.
    Bits8,

    /// Pad the payload to multiples of two bytes.
    Bits16,

    /// Pad the payload to multiples of four bytes.
    Bits32,

    /// Pad the payload to multiples of eight bytes. This is the default.
    Bits64,
}

impl Default for WordSize {
    fn default() -> Self { WordSize::Bits64 }
}

impl WordSize {

    /// Select the word size with the specified number of bits.
    /// Fails for anything other than 8, 16, 32 or 64.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(WordSize::Bits8),
            16 => Ok(WordSize::Bits16),
            32 => Ok(WordSize::Bits32),
            64 => Ok(WordSize::Bits64),
            _ => Err(Error::wrong_arguments(format!(
                "word size must be 8, 16, 32 or 64 bits, not {}", bits
            ))),
        }
    }

    /// The number of bits in a word of this size.
    pub fn bits(self) -> u32 {
        match self {
            WordSize::Bits8 => 8,
            WordSize::Bits16 => 16,
            WordSize::Bits32 => 32,
            WordSize::Bits64 => 64,
        }
    }
}


/// Settings that must be equal for compression and decompression of the same stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Options {

    /// The buffer word of the payload bits.
    pub payload_word: WordSize,
}

impl Options {

    /// Use the specified payload word size.
    pub fn with_payload_word(self, payload_word: WordSize) -> Self {
        Options { payload_word, ..self }
    }
}


/// Compress all bytes from the current position of `read` to its end.
/// The reader is read twice: once to count the bytes, and once to encode them.
/// Between both passes, it is rewound to the position it had when this function was called.
pub fn compress(read: impl Read + Seek, write: impl Write) -> UnitResult {
    compress_with_options(read, write, Options::default())
}

/// Decompress a complete stream.
/// Fails if the stream is damaged, or if any bytes follow the end of the payload.
/// Bytes that were decoded before a problem was detected may already have been written.
pub fn decompress(read: impl Read, write: impl Write) -> UnitResult {
    decompress_with_options(read, write, Options::default())
}

/// Compress with custom options, see `compress`.
pub fn compress_with_options(mut read: impl Read + Seek, mut write: impl Write, options: Options) -> UnitResult {
    let start = read.stream_position()?;
    let (frequencies, element_count) = Frequencies::count(&mut read)?;

    let trie = Trie::from_frequencies(&frequencies);
    let codes = CodeTable::from_trie(&trie);

    let mut write = Tracking::new(&mut write);
    codes.write(&mut write)?;
    let header_size = write.byte_position();

    read.seek(SeekFrom::Start(start))?;

    match options.payload_word {
        WordSize::Bits8 => encode::encode::<u8>(&mut read, &codes, element_count, &mut write)?,
        WordSize::Bits16 => encode::encode::<u16>(&mut read, &codes, element_count, &mut write)?,
        WordSize::Bits32 => encode::encode::<u32>(&mut read, &codes, element_count, &mut write)?,
        WordSize::Bits64 => encode::encode::<u64>(&mut read, &codes, element_count, &mut write)?,
    }

    debug!(
        element_count, distinct_bytes = codes.len(), header_size,
        payload_size = write.byte_position() - header_size,
        "compressed stream"
    );

    Ok(())
}

/// Decompress with custom options, see `decompress`.
pub fn decompress_with_options(mut read: impl Read, mut write: impl Write, options: Options) -> UnitResult {
    let codes = CodeTable::read(&mut read)?;
    let trie = Trie::from_code_table(&codes)?;
    debug!(distinct_bytes = codes.len(), "read code table");

    match options.payload_word {
        WordSize::Bits8 => decode::decode::<u8>(&mut read, &trie, &mut write),
        WordSize::Bits16 => decode::decode::<u16>(&mut read, &trie, &mut write),
        WordSize::Bits32 => decode::decode::<u32>(&mut read, &trie, &mut write),
        WordSize::Bits64 => decode::decode::<u64>(&mut read, &trie, &mut write),
    }
}


/// Compress an in-memory byte slice.
pub fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut compressed = Vec::new();
    compress(Cursor::new(bytes), &mut compressed)?;
    Ok(compressed)
}

/// Decompress an in-memory byte slice.
pub fn decompress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    decompress(bytes, &mut decompressed)?;
    Ok(decompressed)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_examples(){
        let zeroes = vec![ 0_u8; 100 ];

        let examples: &[(&[u8], &str)] = &[
            (b"", "empty string"),
            (b"a", "one letter"),
            (b"aaaaaaaaaaaaaaaaaaaaaaa", "one letter many times"),
            (b"abcdefg", "several letters"),
            (b"~!@#$%^&*()_+~!@#$%^&*()_+", "symbols"),
            (&zeroes, "string with zero bytes"),
        ];

        for &(input, description) in examples {
            let compressed = compress_bytes(input).unwrap();
            let decompressed = decompress_bytes(&compressed)
                .unwrap_or_else(|error| panic!("failed to decompress {}: {}", description, error));

            assert_eq!(decompressed, input, "content mismatch for {}", description);
        }
    }

    #[test]
    fn empty_input_is_an_empty_table_and_zero_elements(){
        let compressed = compress_bytes(&[]).unwrap();
        assert_eq!(compressed, [ 0_u64.to_ne_bytes(), 0_u64.to_ne_bytes() ].concat());
    }

    #[test]
    fn compression_starts_at_current_position(){
        let mut read = Cursor::new(b"skipped|payload".to_vec());
        read.set_position(8);

        let mut compressed = Vec::new();
        compress(&mut read, &mut compressed).unwrap();
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"payload".to_vec());
    }

    #[test]
    fn all_word_sizes(){
        let input = b"It was the best of times, it was the worst of times";

        for &bits in &[ 8, 16, 32, 64 ] {
            let options = Options::default().with_payload_word(WordSize::from_bits(bits).unwrap());

            let mut compressed = Vec::new();
            compress_with_options(Cursor::new(&input[..]), &mut compressed, options).unwrap();

            let mut decompressed = Vec::new();
            decompress_with_options(compressed.as_slice(), &mut decompressed, options).unwrap();
            assert_eq!(decompressed, input.to_vec());
        }
    }

    #[test]
    fn invalid_word_size(){
        assert!(matches!(WordSize::from_bits(12), Err(Error::WrongArguments(_))));
        assert_eq!(WordSize::from_bits(32).unwrap().bits(), 32);
        assert_eq!(WordSize::default().bits(), 64);
    }

    #[test]
    fn empty_stream_is_malformed_header(){
        assert!(matches!(decompress_bytes(&[]), Err(Error::MalformedHeader(_))));
    }
}
