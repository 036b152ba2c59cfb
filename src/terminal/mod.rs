//! Terminal session handling
//!
//! This module owns the controlling terminal for the lifetime of the viewer:
//! it switches the input side into raw mode, remembers the attributes it
//! found, and puts them back on every way out of the process.
//!
//! - `raw`: attribute snapshot, raw-mode enable/disable and the RAII guard
//! - `restore`: last-resort restoration from panic hooks and signal handlers

mod raw;
mod restore;

pub use raw::{disable_raw_mode, enable_raw_mode, RawModeGuard, TerminalSnapshot};
pub use restore::install_restore_handlers;

use std::os::fd::{AsFd, AsRawFd};

use nix::libc;

/// Error type for terminal session operations
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttributes(#[source] nix::Error),

    #[error("Failed to set terminal attributes: {0}")]
    SetAttributes(#[source] nix::Error),

    #[error("Failed to query window size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("Terminal reported an empty window ({cols}x{rows})")]
    EmptyWindow { cols: u16, rows: u16 },

    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] nix::Error),
}

/// Result type for terminal session operations
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Viewport dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            cols: ws.ws_col,
            rows: ws.ws_row,
        }
    }
}

/// Query the viewport size of the terminal behind `fd`
///
/// A terminal that answers with a zero column or row count is treated as a
/// failure: nothing can be drawn into it and the cursor would have nowhere
/// to live.
pub fn window_size<Fd: AsFd>(fd: Fd) -> TerminalResult<WindowSize> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ only writes into the winsize struct we pass in
    let result = unsafe { libc::ioctl(fd.as_fd().as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };

    if result < 0 {
        return Err(TerminalError::WindowSize(nix::errno::Errno::last()));
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Err(TerminalError::EmptyWindow {
            cols: ws.ws_col,
            rows: ws.ws_row,
        });
    }

    Ok(WindowSize::from(ws))
}
