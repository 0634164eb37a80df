
//! Write the payload: the number of elements, followed by the code of each input byte.

use std::io::ErrorKind;
use crate::bits::{BitWriter, Word};
use crate::error::{Error, IoError, UnitResult};
use crate::io::{read_chunks, Data, Read, Write};
use super::table::CodeTable;


/// Re-read the input and write the code of every byte, packed into words of type `W`.
///
/// `element_count` must be the number of bytes the first pass has counted.
/// Fails if the input has changed since, because the written count and table would be wrong.
pub fn encode<W: Word>(read: &mut impl Read, codes: &CodeTable, element_count: u64, write: &mut impl Write) -> UnitResult {
    element_count.write(write)?;

    let mut bits = BitWriter::<W, _>::new(write);
    let mut encoded_count = 0_u64;

    read_chunks(read, |chunk| {
        for &byte in chunk {
            let code = codes.get(byte).ok_or_else(|| IoError::new(
                ErrorKind::InvalidData, "input contains a byte that was not counted before"
            ))?;

            bits.write_bits(code.iter().copied())?;
        }

        encoded_count += chunk.len() as u64;
        Ok(())
    })?;

    bits.flush()?;

    if encoded_count != element_count {
        return Err(Error::Io(IoError::new(
            ErrorKind::InvalidData,
            format!("input had {} bytes while counting, but {} bytes while encoding", element_count, encoded_count)
        )));
    }

    Ok(())
}
