//! Raw mode
//!
//! Raw mode hands every byte to the viewer as soon as it is typed: no line
//! buffering, no echo, no signal keys, no CR/NL translation on either side.

use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use super::{TerminalError, TerminalResult};

/// Terminal attributes captured before raw mode was entered
#[derive(Debug, Clone)]
pub struct TerminalSnapshot {
    termios: Termios,
}

impl TerminalSnapshot {
    /// Capture the current attributes of the terminal behind `fd`
    pub fn capture<Fd: AsFd>(fd: Fd) -> TerminalResult<Self> {
        let termios = termios::tcgetattr(fd).map_err(TerminalError::GetAttributes)?;
        Ok(Self { termios })
    }

    /// The captured attributes
    pub fn termios(&self) -> &Termios {
        &self.termios
    }
}

/// Derive the raw attribute set from the original one
fn make_raw(original: &Termios) -> Termios {
    let mut raw = original.clone();

    raw.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    raw.output_flags.remove(OutputFlags::OPOST);
    raw.control_flags.insert(ControlFlags::CS8);
    raw.local_flags
        .remove(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);

    // Return from read() as soon as one byte is there, never time out
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

    raw
}

/// Put the terminal behind `fd` into raw mode
///
/// Returns the attributes that were active before, which must be handed back
/// to [`disable_raw_mode`] when the session ends.
pub fn enable_raw_mode<Fd: AsFd>(fd: Fd) -> TerminalResult<TerminalSnapshot> {
    let snapshot = TerminalSnapshot::capture(fd.as_fd())?;
    let raw = make_raw(&snapshot.termios);

    termios::tcsetattr(fd, SetArg::TCSAFLUSH, &raw).map_err(TerminalError::SetAttributes)?;
    tracing::debug!("raw mode enabled");

    Ok(snapshot)
}

/// Reapply the attributes captured by [`enable_raw_mode`]
pub fn disable_raw_mode<Fd: AsFd>(fd: Fd, snapshot: &TerminalSnapshot) -> TerminalResult<()> {
    termios::tcsetattr(fd, SetArg::TCSAFLUSH, &snapshot.termios)
        .map_err(TerminalError::SetAttributes)?;
    tracing::debug!("raw mode disabled");
    Ok(())
}

/// RAII guard for raw terminal mode
///
/// The original attributes are restored exactly once: either through
/// [`RawModeGuard::restore`], which reports failures, or on drop, which can
/// only log them.
#[derive(Debug)]
pub struct RawModeGuard<Fd: AsFd> {
    fd: Fd,
    snapshot: Option<TerminalSnapshot>,
}

impl<Fd: AsFd> RawModeGuard<Fd> {
    /// Enter raw mode on `fd`
    pub fn new(fd: Fd) -> TerminalResult<Self> {
        let snapshot = enable_raw_mode(fd.as_fd())?;
        Ok(Self {
            fd,
            snapshot: Some(snapshot),
        })
    }

    /// The attributes that will be restored
    pub fn snapshot(&self) -> Option<&TerminalSnapshot> {
        self.snapshot.as_ref()
    }

    /// Leave raw mode now and report whether that worked
    pub fn restore(mut self) -> TerminalResult<()> {
        match self.snapshot.take() {
            Some(snapshot) => disable_raw_mode(self.fd.as_fd(), &snapshot),
            None => Ok(()),
        }
    }
}

impl<Fd: AsFd> Drop for RawModeGuard<Fd> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Err(e) = disable_raw_mode(self.fd.as_fd(), &snapshot) {
                tracing::warn!("failed to restore terminal: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nix::pty::openpty;

    use nix::libc;

    /// Compare every field, including line discipline and speeds
    fn assert_same_attributes(a: &Termios, b: &Termios) {
        assert_eq!(libc::termios::from(a.clone()), libc::termios::from(b.clone()));
    }

    #[test]
    fn test_make_raw_flags() {
        let pty = openpty(None, None).expect("Failed to open pty");
        let original = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        let raw = make_raw(&original);

        assert!(!raw.local_flags.contains(LocalFlags::ECHO));
        assert!(!raw.local_flags.contains(LocalFlags::ICANON));
        assert!(!raw.local_flags.contains(LocalFlags::ISIG));
        assert!(!raw.local_flags.contains(LocalFlags::IEXTEN));
        assert!(!raw.input_flags.contains(InputFlags::ICRNL));
        assert!(!raw.input_flags.contains(InputFlags::IXON));
        assert!(!raw.input_flags.contains(InputFlags::BRKINT));
        assert!(!raw.output_flags.contains(OutputFlags::OPOST));
        assert!(raw.control_flags.contains(ControlFlags::CS8));
        assert_eq!(raw.control_chars[SpecialCharacterIndices::VMIN as usize], 1);
        assert_eq!(raw.control_chars[SpecialCharacterIndices::VTIME as usize], 0);
    }

    #[test]
    fn test_enable_applies_raw_attributes() {
        let pty = openpty(None, None).expect("Failed to open pty");

        let _snapshot = enable_raw_mode(&pty.slave).expect("enable");
        let current = termios::tcgetattr(&pty.slave).expect("tcgetattr");

        assert!(!current.local_flags.contains(LocalFlags::ECHO));
        assert!(!current.local_flags.contains(LocalFlags::ICANON));
        assert!(!current.output_flags.contains(OutputFlags::OPOST));
    }

    #[test]
    fn test_enable_disable_roundtrip() {
        let pty = openpty(None, None).expect("Failed to open pty");
        let before = termios::tcgetattr(&pty.slave).expect("tcgetattr");

        let snapshot = enable_raw_mode(&pty.slave).expect("enable");
        disable_raw_mode(&pty.slave, &snapshot).expect("disable");

        let after = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        assert_same_attributes(&before, &after);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let pty = openpty(None, None).expect("Failed to open pty");
        let before = termios::tcgetattr(&pty.slave).expect("tcgetattr");

        {
            let guard = RawModeGuard::new(&pty.slave).expect("guard");
            assert!(guard.snapshot().is_some());
        }

        let after = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        assert_same_attributes(&before, &after);
    }

    #[test]
    fn test_guard_explicit_restore() {
        let pty = openpty(None, None).expect("Failed to open pty");
        let before = termios::tcgetattr(&pty.slave).expect("tcgetattr");

        let guard = RawModeGuard::new(&pty.slave).expect("guard");
        guard.restore().expect("restore");

        let after = termios::tcgetattr(&pty.slave).expect("tcgetattr");
        assert_same_attributes(&before, &after);
    }

    #[test]
    fn test_enable_on_non_tty_fails() {
        let file = tempfile::tempfile().expect("Failed to create temp file");
        let err = enable_raw_mode(&file).unwrap_err();
        assert!(matches!(err, TerminalError::GetAttributes(_)));
    }
}
