
//! Specialized binary input and output.
//! Integers are stored in the byte order of the machine,
//! as the compressed stream is read back by the same implementation that wrote it.

pub use ::std::io::{Read, Write};
use lebe::prelude::*;
use crate::error::IoResult;
use std::io::ErrorKind;


/// Size of the chunks that are read from the input at once.
const CHUNK_SIZE: usize = 8 * 1024;


/// Call `consume` for every chunk of bytes of the reader, until the reader is exhausted.
/// Interrupted reads are retried.
pub fn read_chunks(read: &mut impl Read, mut consume: impl FnMut(&[u8]) -> IoResult<()>) -> IoResult<()> {
    let mut chunk = [0_u8; CHUNK_SIZE];

    loop {
        match read.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(count) => consume(&chunk[.. count])?,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

/// Try to read one more byte and report whether there was none.
/// Consumes the byte if there was one.
pub fn is_exhausted(read: &mut impl Read) -> IoResult<bool> {
    let mut byte = [0_u8; 1];

    loop {
        match read.read(&mut byte) {
            Ok(count) => return Ok(count == 0),
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}


/// Keep track of how many bytes were written.
/// Used to report the size of each section of a compressed stream.
#[derive(Debug)]
pub struct Tracking<T> {
    inner: T,
    position: usize,
}

impl<T: Write> Write for Tracking<T> {
    fn write(&mut self, buffer: &[u8]) -> IoResult<usize> {
        let count = self.inner.write(buffer)?;
        self.position += count;
        Ok(count)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.inner.flush()
    }
}

impl<T> Tracking<T> {

    /// Start counting at zero, regardless of what `inner` has seen before.
    pub fn new(inner: T) -> Self {
        Tracking { inner, position: 0 }
    }

    /// Current number of bytes written.
    pub fn byte_position(&self) -> usize {
        self.position
    }
}


/// Generic trait that defines common binary operations such as reading and writing for this type.
/// Errors are plain I/O errors, so that the caller can decide
/// which section of the stream was damaged when the input ends too early.
pub trait Data: Sized + Default + Copy {

    /// Number of bytes this type occupies in a stream.
    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();

    /// Read a value of type `Self`.
    /// Fails with `UnexpectedEof` if the reader ends before the value is complete.
    fn read(read: &mut impl Read) -> IoResult<Self>;

    /// Write this value to the writer.
    fn write(self, write: &mut impl Write) -> IoResult<()>;
}


macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            #[inline]
            fn read(read: &mut impl Read) -> IoResult<Self> {
                read.read_from_native_endian()
            }

            #[inline]
            fn write(self, write: &mut impl Write) -> IoResult<()> {
                write.write_as_native_endian(&self)
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(u32);
implement_data_for_primitive!(u64);
