
//! Lossless byte-oriented Huffman compression.
//!
//! The compressed stream contains the code table it was encoded with,
//! so it can be decompressed without any further information.
//! Decompression checks the structure of the stream
//! and rejects damaged or truncated input instead of producing wrong bytes.
//!
//! ```
//! let text = b"abracadabra, abracadabra";
//! let compressed = huffarc::compression::compress_bytes(text).unwrap();
//! let decompressed = huffarc::compression::decompress_bytes(&compressed).unwrap();
//! assert_eq!(decompressed, text.to_vec());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]


pub mod io;
pub mod bits;
pub mod compression;
pub mod file;
pub mod error;


/// Export the most important items from `huffarc`.
pub mod prelude {

    // main exports
    pub use crate::compression::{
        compress, decompress,
        compress_with_options, decompress_with_options,
        compress_bytes, decompress_bytes,
        Options, WordSize,
    };

    pub use crate::file::{ compress_file, decompress_file };

    // secondary data types
    pub use crate::compression::frequency::Frequencies;
    pub use crate::compression::table::{ Code, CodeTable };
    pub use crate::compression::trie::Trie;
    pub use crate::error::{ Error, Result, UnitResult };
}
