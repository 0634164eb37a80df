
//! Error type definitions.

use std::borrow::Cow;
use std::io::ErrorKind;
pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;
use std::error;
use std::fmt;


/// A result that may contain an archiver error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains an archiver error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing or decompressing a stream.
/// Distinguishes between three types of errors:
/// unusable arguments, damaged streams, and general I/O errors.
#[derive(Debug)]
pub enum Error {

    /// The caller passed arguments that cannot be used,
    /// for example an empty path or an input file that does not exist.
    WrongArguments(Cow<'static, str>),

    /// The code table at the start of a compressed stream
    /// is damaged or ends too early.
    MalformedHeader(Cow<'static, str>),

    /// The packed payload after the code table does not match the table,
    /// ends too early, or is followed by unexpected bytes.
    MalformedData(Cow<'static, str>),

    /// The underlying byte stream returned an error.
    Io(IoError),
}

impl Error {

    /// Create an error of the variant `WrongArguments`.
    pub(crate) fn wrong_arguments(message: impl Into<Cow<'static, str>>) -> Self {
        Error::WrongArguments(message.into())
    }

    /// Create an error of the variant `MalformedHeader`.
    pub(crate) fn malformed_header(message: impl Into<Cow<'static, str>>) -> Self {
        Error::MalformedHeader(message.into())
    }

    /// Create an error of the variant `MalformedData`.
    pub(crate) fn malformed_data(message: impl Into<Cow<'static, str>>) -> Self {
        Error::MalformedData(message.into())
    }

    /// The status code of the command line tool.
    /// Success is zero and is not represented by any error.
    pub fn code(&self) -> i32 {
        match self {
            Error::WrongArguments(_) => 1,
            Error::MalformedHeader(_) => 2,
            Error::MalformedData(_) => 3,
            Error::Io(_) => 4,
        }
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Error::Io(error)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(formatter),
            Error::WrongArguments(message) => write!(formatter, "wrong arguments: {}", message),
            Error::MalformedHeader(message) => write!(formatter, "malformed header: {}", message),
            Error::MalformedData(message) => write!(formatter, "malformed data: {}", message),
        }
    }
}


/// Classify a premature end of the compressed stream.
/// Other I/O errors are kept as they are,
/// because a failing disk does not mean the stream is damaged.
pub(crate) trait ClassifyEof<T> {

    /// Report running out of bytes as a damaged code table.
    fn or_malformed_header(self, message: &'static str) -> Result<T>;

    /// Report running out of bytes as a damaged payload.
    fn or_malformed_data(self, message: &'static str) -> Result<T>;
}

impl<T> ClassifyEof<T> for IoResult<T> {
    fn or_malformed_header(self, message: &'static str) -> Result<T> {
        self.map_err(|error| match error.kind() {
            ErrorKind::UnexpectedEof => Error::malformed_header(message),
            _ => Error::Io(error),
        })
    }

    fn or_malformed_data(self, message: &'static str) -> Result<T> {
        self.map_err(|error| match error.kind() {
            ErrorKind::UnexpectedEof => Error::malformed_data(message),
            _ => Error::Io(error),
        })
    }
}
