//! Error semantics for `PeekBuffer`.

use std::error::Error;
use std::fmt;
use std::io;

/// Error value indicating that a read found no bytes in the buffer.
///
/// This error only occurs for [`PeekBuffer::read`] into a non-empty
/// destination. The snapshot accessors ([`PeekBuffer::to_vec`] and
/// [`PeekBuffer::to_string_lossy`]) return empty results instead.
///
/// [`PeekBuffer::read`]: crate::PeekBuffer::read
/// [`PeekBuffer::to_vec`]: crate::PeekBuffer::to_vec
/// [`PeekBuffer::to_string_lossy`]: crate::PeekBuffer::to_string_lossy
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct EmptyBuffer;

const EMPTYERROR: &str = "empty buffer";

impl Error for EmptyBuffer {}

impl fmt::Display for EmptyBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", EMPTYERROR)
    }
}

impl fmt::Debug for EmptyBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", "EmptyBuffer", EMPTYERROR)
    }
}

impl From<EmptyBuffer> for io::Error {
    fn from(err: EmptyBuffer) -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, err)
    }
}
