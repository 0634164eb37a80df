
//! The code of each byte, and its serialized form at the start of a compressed stream.
//!
//! Header layout, all integers as `u64` in machine byte order:
//!
//! ```text
//! entry count
//! for each entry, in ascending byte order:
//!     byte value       (1 byte)
//!     code bit count
//!     code bits        (packed into whole bytes, first bit in the lowest position)
//! ```

use smallvec::SmallVec;
use crate::bits::{BitReader, BitWriter};
use crate::error::{ClassifyEof, Error, IoResult, Result, UnitResult};
use crate::io::{Data, Read, Write};
use super::frequency::SYMBOL_COUNT;
use super::trie::{Node, NodeIndex, Trie};


/// The bits of a single code, the first bit is the first edge from the root.
/// Most codes are short, so they are stored inline.
pub type Code = SmallVec<[bool; 24]>;

/// A tree over all 256 byte values cannot be deeper than this.
pub const MAX_CODE_LENGTH: usize = SYMBOL_COUNT - 1;


/// Maps each byte value to its code, if the byte occurs at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable { codes: vec![None; SYMBOL_COUNT] }
    }
}

impl CodeTable {

    /// Collect the path to every leaf of the trie.
    /// A zero bit means left, a one bit means right.
    pub fn from_trie(trie: &Trie) -> Self {
        let mut table = CodeTable::default();
        let mut stack: Vec<(NodeIndex, Code)> = Vec::new();

        if let Some(root) = trie.root() {
            stack.push((root, Code::new()));
        }

        // explicit stack instead of recursion, the trie may be 255 levels deep
        while let Some((index, code)) = stack.pop() {
            match trie.node(index) {
                Node::Leaf(byte) => table.insert(byte, code),

                Node::Branch(children) => {
                    for (bit, child) in [ true, false ].iter().zip(children.iter().rev()) {
                        if let Some(child) = *child {
                            let mut child_code = code.clone();
                            child_code.push(*bit);
                            stack.push((child, child_code));
                        }
                    }
                }
            }
        }

        table
    }

    /// Assign a code to a byte, replacing any previous code.
    pub fn insert(&mut self, byte: u8, code: Code) {
        self.codes[byte as usize] = Some(code);
    }

    /// The code of this byte, or `None` if the byte does not occur.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// All bytes that have a code, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|code| (byte as u8, code)))
    }

    /// Number of bytes that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    /// Whether no byte has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the header. Each code is flushed to whole bytes on its own.
    pub fn write(&self, write: &mut impl Write) -> UnitResult {
        (self.len() as u64).write(write)?;

        for (byte, code) in self.iter() {
            byte.write(write)?;
            (code.len() as u64).write(write)?;

            let mut bits = BitWriter::<u8, _>::new(write);
            bits.write_bits(code.iter().copied())?;
            bits.flush()?;
        }

        Ok(())
    }

    /// Read and validate a header.
    pub fn read(read: &mut impl Read) -> Result<Self> {
        let entry_count = u64::read(read)
            .or_malformed_header("stream ends before the code table size")?;

        if entry_count > SYMBOL_COUNT as u64 {
            return Err(Error::malformed_header(format!(
                "code table declares {} entries, but there are only {} byte values",
                entry_count, SYMBOL_COUNT
            )));
        }

        let mut table = CodeTable::default();

        for _ in 0 .. entry_count {
            let byte = u8::read(read)
                .or_malformed_header("stream ends inside the code table")?;

            let code_length = u64::read(read)
                .or_malformed_header("stream ends inside the code table")?;

            if code_length > MAX_CODE_LENGTH as u64 {
                return Err(Error::malformed_header(format!(
                    "code of byte {} has {} bits, but at most {} are possible",
                    byte, code_length, MAX_CODE_LENGTH
                )));
            }

            if table.get(byte).is_some() {
                return Err(Error::malformed_header(format!(
                    "code table contains byte {} twice", byte
                )));
            }

            let mut bits = BitReader::<u8, _>::new(read);
            let code = (0 .. code_length)
                .map(|_| bits.read_bit())
                .collect::<IoResult<Code>>()
                .or_malformed_header("stream ends inside a code of the code table")?;

            table.insert(byte, code);
        }

        Ok(table)
    }
}
