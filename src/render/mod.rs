//! Frame rendering
//!
//! Each frame repaints the whole viewport from the top-left corner. Rows are
//! cleared individually with EL rather than clearing the screen first, and
//! the frame goes out in a single write, so a redraw never shows a blank or
//! half-drawn screen.

pub mod ansi;

use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd};

use crate::document::Document;
use crate::editor::ViewState;

/// Crate version shown in the welcome banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Drawn at the start of rows past the end of the document
const PLACEHOLDER: u8 = b'~';

/// The welcome banner text
pub fn banner() -> String {
    format!("Gilo editor -- version {}", VERSION)
}

/// Build one complete frame for `view` over `document`
pub fn render_frame(view: &ViewState, document: &Document) -> Vec<u8> {
    let mut frame = Vec::with_capacity(view.rows() * (view.cols() + 8) + 32);

    frame.extend_from_slice(ansi::HIDE_CURSOR);
    frame.extend_from_slice(ansi::CURSOR_HOME);

    draw_rows(&mut frame, view, document);

    frame.extend_from_slice(ansi::SHOW_CURSOR);
    // Writing to a Vec cannot fail
    let _ = ansi::cursor_position(&mut frame, view.cy() + 1, view.cx() + 1);

    frame
}

fn draw_rows(frame: &mut Vec<u8>, view: &ViewState, document: &Document) {
    let (cols, rows) = (view.cols(), view.rows());

    for y in 0..rows {
        if let Some(row) = document.row(y) {
            let content = row.as_bytes();
            frame.extend_from_slice(&content[..content.len().min(cols)]);
        } else if document.is_empty() && y == rows / 3 {
            draw_banner(frame, cols);
        } else {
            frame.push(PLACEHOLDER);
        }

        frame.extend_from_slice(ansi::ERASE_LINE);
        if y + 1 < rows {
            frame.extend_from_slice(ansi::CRLF);
        }
    }
}

/// Center the banner, keeping the placeholder in the first column
fn draw_banner(frame: &mut Vec<u8>, cols: usize) {
    let banner = banner();
    let text = &banner.as_bytes()[..banner.len().min(cols)];

    let mut padding = (cols - text.len()) / 2;
    if padding > 0 {
        frame.push(PLACEHOLDER);
        padding -= 1;
    }
    frame.resize(frame.len() + padding, b' ');
    frame.extend_from_slice(text);
}

/// Writes frames to the terminal
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer over an output stream
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Render and flush one frame
    pub fn draw(&mut self, view: &ViewState, document: &Document) -> io::Result<()> {
        let frame = render_frame(view, document);
        self.out.write_all(&frame)?;
        self.out.flush()
    }

    /// Clear the screen and home the cursor, for leaving the viewer
    pub fn clear(&mut self) -> io::Result<()> {
        let mut buf = Vec::with_capacity(ansi::ERASE_DISPLAY.len() + ansi::CURSOR_HOME.len());
        buf.extend_from_slice(ansi::ERASE_DISPLAY);
        buf.extend_from_slice(ansi::CURSOR_HOME);
        self.out.write_all(&buf)?;
        self.out.flush()
    }

    /// Borrow the output stream
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Get the output stream back
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Unbuffered output to a terminal file descriptor
///
/// `Stdout` is line buffered and would split a frame at its last line
/// break; this hands the whole frame to `write(2)` at once.
#[derive(Debug)]
pub struct TtyOutput<Fd: AsFd> {
    fd: Fd,
}

impl<Fd: AsFd> TtyOutput<Fd> {
    /// Wrap `fd`
    pub fn new(fd: Fd) -> Self {
        Self { fd }
    }
}

impl<Fd: AsFd> Write for TtyOutput<Fd> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        nix::unistd::write(self.fd.as_fd().as_raw_fd(), buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
