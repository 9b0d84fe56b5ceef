use std::convert::From;
use std::error;
use std::fmt;
use std::io;

/// Why a bitmap size was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeError {
    /// One of the dimensions is 0. The smallest bitmap is 1x1.
    TooSmall,
    /// The pixel count overflows, or the pixel data cannot be allocated.
    TooLarge,
}

/// The axis of an out-of-bounds coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug)]
pub enum Error {
    /// The requested bitmap dimensions cannot be handled.
    InvalidSize(SizeError),
    /// A pixel access was outside the bitmap bounds.
    InvalidCoordinate(Axis, usize),
    /// The byte source ran out of data mid-word.
    ShortRead { requested: usize, read: usize },
    /// The byte sink stopped accepting data mid-word.
    WriteFailed { requested: usize, written: usize },
    /// Any other I/O failure.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize(SizeError::TooSmall) => {
                write!(f, "the requested size is too small, the smallest bitmap is 1x1")
            }
            Error::InvalidSize(SizeError::TooLarge) => {
                write!(f, "the requested size is too large to fit in memory")
            }
            Error::InvalidCoordinate(Axis::X, value) => {
                write!(f, "x coordinate {} is out of bounds", value)
            }
            Error::InvalidCoordinate(Axis::Y, value) => {
                write!(f, "y coordinate {} is out of bounds", value)
            }
            Error::ShortRead { requested, read } => {
                write!(f, "corrupt data: requested {} bytes, got {}", requested, read)
            }
            Error::WriteFailed { requested, written } => {
                write!(f, "write failed: requested {} bytes, wrote {}", requested, written)
            }
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
