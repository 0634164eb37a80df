
//! Compress and decompress files on disk.
//! Both files are buffered, as the codec reads and writes in small pieces.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;
use crate::compression::{compress_with_options, decompress_with_options, Options};
use crate::error::{Error, Result, UnitResult};
use crate::io::Write;


/// Size of the read buffer and of the write buffer.
const BUFFER_SIZE: usize = 1 << 20;


/// Compress the input file into the output file.
/// The output file is created or truncated.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>, options: Options) -> UnitResult {
    let (read, mut write) = open_files(input.as_ref(), output.as_ref())?;
    compress_with_options(read, &mut write, options)?;
    write.flush()?;
    Ok(())
}

/// Decompress the input file into the output file.
/// The output file is created or truncated,
/// and may contain partially decompressed data if the input is damaged.
pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>, options: Options) -> UnitResult {
    let (read, mut write) = open_files(input.as_ref(), output.as_ref())?;
    decompress_with_options(read, &mut write, options)?;
    write.flush()?;
    Ok(())
}


fn open_files(input: &Path, output: &Path) -> Result<(BufReader<File>, BufWriter<File>)> {
    validate_paths(input, output)?;
    debug!(input = %input.display(), output = %output.display(), "opening files");

    let read = BufReader::with_capacity(BUFFER_SIZE, File::open(input)?);
    let write = BufWriter::with_capacity(BUFFER_SIZE, File::create(output)?);
    Ok((read, write))
}

/// Check the paths before touching any file,
/// so that invalid arguments never truncate an existing output file.
fn validate_paths(input: &Path, output: &Path) -> UnitResult {
    if input.as_os_str().is_empty() {
        return Err(Error::wrong_arguments("input path can't be empty"));
    }

    if output.as_os_str().is_empty() {
        return Err(Error::wrong_arguments("output path can't be empty"));
    }

    if !input.is_file() {
        return Err(Error::wrong_arguments(format!("{}: No such file", input.display())));
    }

    // truncating the output would destroy the input before it is read
    if let (Ok(input), Ok(output)) = (input.canonicalize(), output.canonicalize()) {
        if input == output {
            return Err(Error::wrong_arguments("input and output must be different files"));
        }
    }

    Ok(())
}
