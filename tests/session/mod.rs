//! Pseudoterminal helpers shared by the session tests

use std::fs::File;
use std::io::Read;
use std::os::fd::{AsFd, OwnedFd};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use nix::libc;
use nix::poll::{poll, PollFd, PollFlags};
use nix::pty::{openpty, Winsize};
use nix::sys::termios::Termios;

/// Both ends of a pty
pub struct PtyPair {
    pub master: File,
    pub slave: OwnedFd,
}

/// Open a pty with the given viewport size
pub fn open_pty(cols: u16, rows: u16) -> PtyPair {
    let ws = Winsize {
        ws_row: rows,
        ws_col: cols,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let pty = openpty(Some(&ws), None).expect("Failed to open pty");
    PtyPair {
        master: File::from(pty.master),
        slave: pty.slave,
    }
}

/// Read everything the slave side has written so far
pub fn read_available(master: &mut File) -> Vec<u8> {
    let mut output = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let ready = {
            let fd = master.as_fd();
            let mut fds = [PollFd::new(&fd, PollFlags::POLLIN)];
            poll(&mut fds, 100).unwrap_or(0) > 0
        };
        if !ready {
            break;
        }
        match master.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => output.extend_from_slice(&buf[..n]),
        }
    }

    output
}

/// Compare the complete attribute sets, speeds and line discipline included
pub fn same_attributes(a: &Termios, b: &Termios) -> bool {
    libc::termios::from(a.clone()) == libc::termios::from(b.clone())
}

/// Launch the `gilo` binary with all three standard streams on the slave
///
/// `HOME` points at `home` so no user configuration is picked up.
pub fn spawn_viewer(pty: &PtyPair, home: &Path) -> Child {
    let stream = || Stdio::from(pty.slave.try_clone().expect("Failed to clone slave"));
    Command::new(env!("CARGO_BIN_EXE_gilo"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .stdin(stream())
        .stdout(stream())
        .stderr(stream())
        .spawn()
        .expect("Failed to spawn gilo")
}

/// Collect output until it contains `needle` or five seconds pass
pub fn read_until(master: &mut File, needle: &[u8]) -> Vec<u8> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut output = Vec::new();

    while Instant::now() < deadline {
        output.extend_from_slice(&read_available(master));
        if output.windows(needle.len()).any(|w| w == needle) {
            break;
        }
    }

    output
}

/// Wait for the child to exit, killing it if it has not within five seconds
pub fn wait_with_timeout(child: &mut Child) -> ExitStatus {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(status) = child.try_wait().expect("try_wait") {
            return status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            panic!("gilo did not exit");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
