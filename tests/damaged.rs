//! Damaged streams must never cause a panic, and structural damage must be reported as malformed input.
//! The long random mutation test is marked with `#[ignore]`. To run it, use `cargo test -- --ignored`.

extern crate huffarc;

use std::io::{ErrorKind, Write};
use std::panic::catch_unwind;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use huffarc::prelude::*;

fn random_text(size: usize, alphabet_size: usize) -> Vec<u8> {
    let mut random = StdRng::seed_from_u64(10_000);
    let alphabet: Vec<u8> = (0 .. alphabet_size).map(|_| random.random::<u8>()).collect();
    (0 .. size).map(|_| alphabet[random.random_range(0 .. alphabet.len())]).collect()
}

/// A stream with a single symbol may declare any number of elements,
/// which all decode without consuming input. Stop writing after a while.
struct LimitedWrite {
    remaining: usize,
}

impl Write for LimitedWrite {
    fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
        if buffer.len() > self.remaining {
            return Err(std::io::Error::new(ErrorKind::Other, "output limit reached"));
        }

        self.remaining -= buffer.len();
        Ok(buffer.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn is_malformed(result: &Result<Vec<u8>>) -> bool {
    matches!(result, Err(Error::MalformedHeader(_)) | Err(Error::MalformedData(_)))
}

#[test]
fn flipped_header_bytes() {
    let original = random_text(10_000, 10);
    let mut compressed = compress_bytes(&original).unwrap();
    assert!(compressed.len() > 200);

    for index in 0 .. 8 {
        compressed[index] = !compressed[index];

        let result = decompress_bytes(&compressed);
        assert!(is_malformed(&result), "missed malformed header with byte {} flipped", index);

        compressed[index] = !compressed[index];
    }

    assert_eq!(decompress_bytes(&compressed).unwrap(), original);
}

#[test]
fn oversized_entry_count() {
    let mut compressed = compress_bytes(b"some text").unwrap();
    compressed[.. 8].copy_from_slice(&257_u64.to_ne_bytes());
    assert!(matches!(decompress_bytes(&compressed), Err(Error::MalformedHeader(_))));
}

#[test]
fn appended_byte() {
    let mut compressed = compress_bytes(&random_text(10_000, 10)).unwrap();
    compressed.push(b'0');
    assert!(matches!(decompress_bytes(&compressed), Err(Error::MalformedData(_))));
}

#[test]
fn removed_last_byte() {
    let mut compressed = compress_bytes(&random_text(10_000, 10)).unwrap();
    compressed.pop();
    assert!(matches!(decompress_bytes(&compressed), Err(Error::MalformedData(_))));
}

#[test]
fn every_truncation() {
    let compressed = compress_bytes(b"the rain in spain stays mainly in the plain").unwrap();

    for length in 0 .. compressed.len() {
        let result = decompress_bytes(&compressed[.. length]);
        assert!(is_malformed(&result), "missed truncation to {} bytes", length);
    }
}

#[test]
fn empty_table_with_elements() {
    let mut stream = 0_u64.to_ne_bytes().to_vec();
    stream.extend_from_slice(&3_u64.to_ne_bytes());
    assert!(matches!(decompress_bytes(&stream), Err(Error::MalformedData(_))));
}

#[test]
fn single_symbol_with_extra_payload() {
    let mut compressed = compress_bytes(&[ b'z'; 50 ]).unwrap();
    compressed.extend_from_slice(&[ 0; 8 ]);
    assert!(matches!(decompress_bytes(&compressed), Err(Error::MalformedData(_))));
}

#[test]
fn wrong_word_size_is_detected() {
    // 13 payload bits fill two bytes, but not a 64 bit word
    let input = b"aaaaaaabbc";

    let mut compressed = Vec::new();
    let small_words = Options::default().with_payload_word(WordSize::Bits8);
    compress_with_options(std::io::Cursor::new(&input[..]), &mut compressed, small_words).unwrap();

    let result = decompress_bytes(&compressed);
    assert!(is_malformed(&result));
}

#[test]
pub fn mutations_never_panic() {
    let original = random_text(2_000, 30);
    let compressed = compress_bytes(&original).unwrap();
    let mut random = StdRng::seed_from_u64(92);

    for _ in 0 .. 2_000 {
        let mut damaged = compressed.clone();
        let index = random.random_range(0 .. damaged.len());
        damaged[index] = random.random::<u8>();

        let result = catch_unwind(move || decompress_bytes(&damaged));

        match result {
            Ok(Ok(_)) | Ok(Err(Error::MalformedHeader(_))) | Ok(Err(Error::MalformedData(_))) => {},
            Ok(Err(error)) => panic!("unexpected error kind at byte {}: {}", index, error),
            Err(_) => panic!("panic when byte {} was damaged", index),
        }
    }
}

#[test]
#[ignore]
pub fn fuzz() {
    println!("started fuzzing");
    let seed = [92,1,0,30,2,8,21,70,74,4,9,9,0,23,0,3,20,5,6,5,9,30,0,34,8,0,40,7,5,2,7,0];
    let mut random: StdRng = SeedableRng::from_seed(seed);

    for fuzz_index in 0 .. 1024_u64 * 64 {
        let size = random.random_range(0 .. 4096);
        let alphabet_size = random.random_range(1 .. 257);
        let mut bytes = random_text(size, alphabet_size);

        if random.random::<bool>() {
            bytes = compress_bytes(&bytes).unwrap();
        }

        let mutation_count = random.random_range(0 .. 4);
        for _ in 0 .. mutation_count {
            if bytes.is_empty() { break; }
            let index = random.random_range(0 .. bytes.len());
            bytes[index] = random.random::<u8>();
        }

        let result = catch_unwind(move || {
            decompress(bytes.as_slice(), LimitedWrite { remaining: 1 << 20 })
        });

        match result {
            Ok(Err(Error::Io(error))) if error.kind() == ErrorKind::Other => {},
            Ok(Err(Error::Io(error))) => panic!("[{}]: unexpected io error: {}", fuzz_index, error),
            Err(error) => panic!("[{}]: {:?}", fuzz_index, error),
            _ => {},
        }
    }
}
