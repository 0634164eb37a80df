
//! Read the payload back: walk the trie once per declared element,
//! and make sure the stream ends exactly where the last word ends.

use crate::bits::{BitReader, Word};
use crate::error::{ClassifyEof, Error, UnitResult};
use crate::io::{is_exhausted, Data, Read, Write};
use super::trie::{Node, Trie};


/// Decoded bytes are collected up to this size before they are written.
const OUTPUT_CHUNK_SIZE: usize = 8 * 1024;


/// Decode all elements of the payload and write them.
/// Bytes that were decoded before an error is detected may already have been written.
pub fn decode<W: Word>(read: &mut impl Read, trie: &Trie, write: &mut impl Write) -> UnitResult {
    let element_count = u64::read(read)
        .or_malformed_data("stream ends before the element count")?;

    let root = match trie.root() {
        Some(root) => root,
        None if element_count == 0 => return expect_end(read),
        None => return Err(Error::malformed_data(format!(
            "payload declares {} elements, but the code table is empty", element_count
        ))),
    };

    let mut bits = BitReader::<W, _>::new(read);
    let mut decoded = Vec::with_capacity(OUTPUT_CHUNK_SIZE);

    for _ in 0 .. element_count {
        let mut node = root;

        // a lonely leaf as the root has an empty code and consumes no bits
        let byte = loop {
            match trie.node(node) {
                Node::Leaf(byte) => break byte,

                Node::Branch(children) => {
                    let bit = bits.read_bit()
                        .or_malformed_data("payload ends before all elements are decoded")?;

                    node = children[bit as usize].ok_or_else(|| Error::malformed_data(
                        "payload contains a code that is not in the code table"
                    ))?;
                },
            }
        };

        decoded.push(byte);

        if decoded.len() == OUTPUT_CHUNK_SIZE {
            write.write_all(&decoded)?;
            decoded.clear();
        }
    }

    write.write_all(&decoded)?;
    expect_end(read)
}

/// The padding of the last word was the end of the payload.
/// Anything after that means the stream does not fit its header.
fn expect_end(read: &mut impl Read) -> UnitResult {
    if is_exhausted(read)? { Ok(()) }
    else { Err(Error::malformed_data("unexpected bytes after the payload")) }
}
