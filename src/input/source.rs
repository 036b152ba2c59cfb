//! Byte sources for the key decoder
//!
//! The decoder needs two kinds of read: a blocking one for the first byte of
//! a key, and a bounded one for the tail of an escape sequence, which may
//! never arrive if the user simply pressed Escape.

use std::io::{self, Read};
use std::os::fd::{AsFd, AsRawFd};

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags};
use nix::unistd::read;

/// Default wait for the trailing bytes of an escape sequence
pub const DEFAULT_ESCAPE_TIMEOUT_MS: u64 = 100;

/// A stream of raw input bytes
pub trait ByteSource {
    /// Block until one byte is available
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Return the next byte if one arrives soon, `None` otherwise
    fn try_read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Input read straight from a terminal file descriptor
///
/// Reads go through `read(2)` one byte at a time rather than through a
/// buffered reader: `poll` only sees what is still in the kernel queue, so
/// any userspace buffering would hide the tail of an escape sequence.
#[derive(Debug)]
pub struct TtySource<Fd: AsFd> {
    fd: Fd,
    timeout_ms: i32,
}

impl<Fd: AsFd> TtySource<Fd> {
    /// Wrap `fd`, waiting up to `timeout_ms` for escape sequence tails
    pub fn new(fd: Fd, timeout_ms: u64) -> Self {
        Self {
            fd,
            timeout_ms: i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        }
    }

    fn read_one(&self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match read(self.fd.as_fd().as_raw_fd(), &mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(io::Error::from(e)),
            }
        }
    }

    fn poll_readable(&self) -> io::Result<bool> {
        let fd = self.fd.as_fd();
        let mut fds = [PollFd::new(&fd, PollFlags::POLLIN)];
        loop {
            match poll(&mut fds, self.timeout_ms) {
                Ok(n) => {
                    return Ok(n > 0
                        && fds[0]
                            .revents()
                            .is_some_and(|r| r.contains(PollFlags::POLLIN)))
                },
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(io::Error::from(e)),
            }
        }
    }
}

impl<Fd: AsFd> ByteSource for TtySource<Fd> {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.read_one()?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed")
        })
    }

    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.poll_readable()? {
            self.read_one()
        } else {
            Ok(None)
        }
    }
}

/// Input from any [`Read`] implementation
///
/// End of input counts as "nothing more arrived", so a sequence cut short
/// by the end of the stream never blocks.
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Get the wrapped reader back
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Borrow the wrapped reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    fn read_one(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.read_one()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }

    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        self.read_one()
    }
}
