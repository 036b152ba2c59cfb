//! Last-resort terminal restoration
//!
//! `RawModeGuard` covers normal returns and unwinding. Two exits bypass it:
//! the panic message is printed before the stack unwinds (so it would come
//! out in raw mode), and a fatal signal never unwinds at all. Both paths
//! restore from a copy of the snapshot stored here.

use std::os::fd::{AsFd, AsRawFd, RawFd};
use std::sync::OnceLock;

use nix::libc;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use super::{TerminalError, TerminalResult, TerminalSnapshot};

/// Signals that terminate the process while raw mode may be active
const FATAL_SIGNALS: [Signal; 4] = [
    Signal::SIGTERM,
    Signal::SIGHUP,
    Signal::SIGQUIT,
    Signal::SIGINT,
];

/// Written once before raw mode is entered, read from the hooks below
static ORIGINAL: OnceLock<(RawFd, libc::termios)> = OnceLock::new();

/// Restore the stored attributes using only async-signal-safe calls
fn restore_original() {
    if let Some((fd, termios)) = ORIGINAL.get() {
        // SAFETY: tcsetattr is async-signal-safe and `termios` lives in a static
        unsafe {
            libc::tcsetattr(*fd, libc::TCSAFLUSH, termios);
        }
    }
}

extern "C" fn handle_fatal_signal(signum: libc::c_int) {
    restore_original();

    // SAFETY: resetting to the default disposition and re-raising are both
    // async-signal-safe; the process then dies the way it would have
    unsafe {
        libc::signal(signum, libc::SIG_DFL);
        libc::raise(signum);
    }
}

/// Arrange for `snapshot` to be reapplied on panic and on fatal signals
///
/// Only the first call has an effect; the viewer owns a single terminal for
/// its whole life.
pub fn install_restore_handlers<Fd: AsFd>(
    fd: Fd,
    snapshot: &TerminalSnapshot,
) -> TerminalResult<()> {
    let termios = libc::termios::from(snapshot.termios().clone());
    if ORIGINAL.set((fd.as_fd().as_raw_fd(), termios)).is_err() {
        return Ok(());
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_original();
        previous(info);
    }));

    let action = SigAction::new(
        SigHandler::Handler(handle_fatal_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );
    for signal in FATAL_SIGNALS {
        // SAFETY: the handler only calls async-signal-safe functions
        unsafe { sigaction(signal, &action) }.map_err(TerminalError::Signal)?;
    }

    tracing::debug!("installed terminal restore handlers");
    Ok(())
}
