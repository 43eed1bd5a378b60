//! A thread-safe circular byte buffer with fixed capacity.
//!
//! [`PeekBuffer`] supports typical append-only (stream) write access, and in
//! addition allows full reads of the current contents at any time
//! ("peeking"). Writes never block on unread data: once the buffer is full,
//! new bytes overwrite the oldest ones, so the buffer always holds the most
//! recent `capacity` bytes of everything written to it. Reads are snapshots,
//! not dequeues; reading does not consume data.
//!
//! This makes it a good fit behind a logging tail, a rolling telemetry
//! window, or a "last N bytes" capture buffer, where producers continuously
//! append and consumers periodically snapshot recent history.
//!
//! All methods take `&self`; the buffer state sits behind a reader/writer
//! lock, so a `PeekBuffer` can be shared across threads directly (e.g. in an
//! `Arc`). Any number of reads may proceed concurrently, writes are
//! exclusive, and a read that starts after a write completes observes that
//! write in full.
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! peekbuffer = "0.1"
//! ```
//!
//! # Examples
//!
//! ```
//! use peekbuffer::PeekBuffer;
//!
//! let buffer = PeekBuffer::with_capacity(8);
//!
//! buffer.write(b"hello, ");
//! buffer.write(b"world");
//!
//! // 12 bytes went in, the newest 8 remain:
//! assert_eq!(buffer.to_vec(), b"o, world");
//! assert_eq!(buffer.to_string_lossy(), "o, world");
//! ```
//!
//! # Overwrite semantics
//!
//! ```
//! use peekbuffer::PeekBuffer;
//!
//! let buffer = PeekBuffer::with_capacity(4);
//!
//! // While filling, contents accumulate in write order:
//! buffer.write(b"abc");
//! assert_eq!(buffer.to_vec(), b"abc");
//!
//! // Once full, the oldest bytes are evicted first:
//! buffer.write(b"de");
//! assert_eq!(buffer.to_vec(), b"bcde");
//! ```

#![deny(missing_docs)]

use std::fmt;
use std::io;

use parking_lot::RwLock;

pub mod error;

pub use error::EmptyBuffer;

/// A fixed capacity ring buffer over bytes that supports peeking.
///
/// The buffer tracks a write position that wraps around the end of its
/// storage and a length that saturates at the capacity. Writes always accept
/// all of their input, evicting the oldest bytes once the buffer is full;
/// reads return the held bytes in oldest-to-newest order without consuming
/// them.
///
/// Interior locking makes every method available through `&self`. Writes and
/// [`reset`] take the buffer's lock exclusively; reads and snapshots share
/// it.
///
/// [`reset`]: PeekBuffer::reset
///
/// # Examples
///
/// ```
/// use peekbuffer::PeekBuffer;
///
/// let buffer = PeekBuffer::with_capacity(10);
///
/// buffer.write(b"12");
/// assert_eq!(buffer.len(), 2);
///
/// let mut out = [0u8; 10];
/// let n = buffer.read(&mut out).unwrap();
/// assert_eq!(&out[..n], b"12");
/// ```
#[derive(Debug)]
pub struct PeekBuffer {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    buf: Box<[u8]>,
    len: usize,
    pos: usize,
}

impl Inner {
    #[inline]
    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Appends `data`, overwriting the oldest bytes once full.
    ///
    /// Caller holds the write lock.
    fn write(&mut self, data: &[u8]) {
        let cap = self.capacity();
        let written;
        if data.len() <= cap - self.pos {
            // Fits in the remaining linear space, no wrap needed.
            self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
            self.pos += data.len();
            written = data.len();
        } else if data.len() >= cap {
            // The input covers the whole buffer, so only its last `cap`
            // bytes survive. Equivalent to refilling a fresh buffer; any
            // previously computed read offset is invalid afterwards.
            self.buf.copy_from_slice(&data[data.len() - cap..]);
            self.pos = 0;
            written = cap;
        } else {
            // Wraps: fill the tail, then continue from the front.
            let remaining = cap - self.pos;
            self.buf[self.pos..].copy_from_slice(&data[..remaining]);
            self.buf[..data.len() - remaining].copy_from_slice(&data[remaining..]);
            self.pos = data.len() - remaining;
            written = data.len();
        }

        if self.pos == cap {
            self.pos = 0;
        }

        if self.len < cap {
            // Length only grows until the buffer is full; past that point
            // writes are pure overwrites.
            self.len = cap.min(self.len + written);
        }
    }

    /// Copies up to `dst.len()` held bytes into `dst`, oldest first.
    ///
    /// Caller holds at least the read lock. Never fails; an empty buffer
    /// copies nothing and returns 0.
    fn read_into(&self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len);

        // Two-branch read-start rule: until the buffer wraps for the first
        // time the data sits contiguously at the front of the storage; once
        // wrapped, the oldest byte is at `pos`, the slot the next write
        // would overwrite.
        let start = if self.pos >= self.len { 0 } else { self.pos };

        if start + n <= self.capacity() {
            dst[..n].copy_from_slice(&self.buf[start..start + n]);
        } else {
            let remaining = self.capacity() - start;
            dst[..remaining].copy_from_slice(&self.buf[start..]);
            dst[remaining..n].copy_from_slice(&self.buf[..n - remaining]);
        }
        n
    }
}

impl PeekBuffer {
    /// Creates an empty `PeekBuffer` with zero-filled storage of exactly
    /// `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. A zero-capacity ring buffer degenerates
    /// into one that can never hold data, so it is rejected up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// assert_eq!(buffer.capacity(), 10);
    /// assert_eq!(buffer.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> PeekBuffer {
        assert!(capacity > 0, "capacity must be non-zero");
        PeekBuffer {
            inner: RwLock::new(Inner {
                buf: vec![0; capacity].into_boxed_slice(),
                len: 0,
                pos: 0,
            }),
        }
    }

    /// Appends `data` to the buffer, overwriting the oldest bytes once the
    /// buffer is full, and returns `data.len()`.
    ///
    /// The whole input is always accepted: the write conceptually streams
    /// through inputs of any size and the buffer retains the most recent
    /// `capacity` bytes. In particular, writing a slice at least as large as
    /// the capacity replaces the entire contents with the slice's last
    /// `capacity` bytes.
    ///
    /// Takes the write lock; never blocks waiting for space and never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(4);
    ///
    /// assert_eq!(buffer.write(b"abcdef"), 6);
    /// assert_eq!(buffer.to_vec(), b"cdef");
    /// ```
    pub fn write(&self, data: &[u8]) -> usize {
        self.inner.write().write(data);
        data.len()
    }

    /// Reads up to `dst.len()` bytes into `dst`, oldest to newest, and
    /// returns the number of bytes copied.
    ///
    /// This is a peek: the bytes stay in the buffer, and repeated reads with
    /// no intervening write return the same data. Asking for more bytes than
    /// are held is not an error; the read saturates to [`len`] and reports
    /// the shorter count. A zero-length `dst` reads 0 bytes without error.
    ///
    /// Takes the read lock, so any number of reads may run concurrently.
    ///
    /// [`len`]: PeekBuffer::len
    ///
    /// # Errors
    ///
    /// Returns [`EmptyBuffer`] if the buffer holds no bytes and `dst` is
    /// non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// buffer.write(b"12");
    ///
    /// let mut out = [0u8; 37];
    /// assert_eq!(buffer.read(&mut out), Ok(2));
    /// assert_eq!(&out[..2], b"12");
    /// ```
    pub fn read(&self, dst: &mut [u8]) -> Result<usize, EmptyBuffer> {
        let inner = self.inner.read();
        if inner.len == 0 && !dst.is_empty() {
            return Err(EmptyBuffer);
        }
        Ok(inner.read_into(dst))
    }

    /// Returns the current contents as an owned `Vec<u8>`, oldest to newest.
    ///
    /// An empty buffer yields an empty vector; unlike [`read`], this never
    /// fails.
    ///
    /// [`read`]: PeekBuffer::read
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// assert_eq!(buffer.to_vec(), Vec::<u8>::new());
    ///
    /// buffer.write(b"123");
    /// assert_eq!(buffer.to_vec(), b"123");
    /// ```
    pub fn to_vec(&self) -> Vec<u8> {
        let inner = self.inner.read();
        let mut out = vec![0; inner.len];
        inner.read_into(&mut out);
        out
    }

    /// Returns the current contents decoded as UTF-8, oldest to newest.
    ///
    /// Decoding is lossy: an overwrite can evict part of a multi-byte
    /// character, and the dangling bytes decode to U+FFFD. An empty buffer
    /// yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// buffer.write("grüße".as_bytes());
    /// assert_eq!(buffer.to_string_lossy(), "grüße");
    /// ```
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_vec()).into_owned()
    }

    /// Empties the buffer.
    ///
    /// The length and write position return to zero; the backing storage is
    /// not zeroed, stale bytes merely become unreachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// buffer.write(b"123");
    /// buffer.reset();
    ///
    /// assert!(buffer.is_empty());
    /// ```
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.len = 0;
        inner.pos = 0;
    }

    /// Returns the number of bytes currently held.
    ///
    /// Grows with writes until it reaches the capacity and stays there;
    /// only [`reset`] brings it back down.
    ///
    /// [`reset`]: PeekBuffer::reset
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(4);
    /// buffer.write(b"abcdef");
    /// assert_eq!(buffer.len(), 4);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len
    }

    /// Returns `true` if the buffer holds no bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(4);
    /// assert!(buffer.is_empty());
    ///
    /// buffer.write(b"a");
    /// assert!(!buffer.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the buffer holds `capacity` bytes, i.e. further
    /// writes overwrite the oldest data.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(2);
    /// buffer.write(b"ab");
    /// assert!(buffer.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        let inner = self.inner.read();
        inner.len == inner.capacity()
    }

    /// Returns the fixed capacity of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekbuffer::PeekBuffer;
    ///
    /// let buffer = PeekBuffer::with_capacity(10);
    /// assert_eq!(buffer.capacity(), 10);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }
}

impl fmt::Display for PeekBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

/// Write sink over a shared buffer reference.
///
/// Never fails and never blocks; [`PeekBuffer::write`] accepts all input by
/// overwriting the oldest bytes.
impl io::Write for &PeekBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Ok(PeekBuffer::write(*self, data))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for PeekBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Ok(PeekBuffer::write(self, data))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read source over a shared buffer reference.
///
/// Reads are peeks: the buffer keeps its contents, and repeated reads with
/// no intervening write return the same bytes. An empty buffer fails with
/// `io::ErrorKind::UnexpectedEof`.
impl io::Read for &PeekBuffer {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        Ok(PeekBuffer::read(*self, dst)?)
    }
}

impl io::Read for PeekBuffer {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        Ok(PeekBuffer::read(self, dst)?)
    }
}
