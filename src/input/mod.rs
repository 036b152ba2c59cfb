//! Key decoding
//!
//! Turns the raw byte stream of a terminal in raw mode into [`Key`] events.
//!
//! Plain bytes map one-to-one to [`Key::Char`]. An escape byte (`0x1B`)
//! starts a lookahead for one of the VT100/xterm navigation sequences:
//!
//! | Sequence              | Key       |
//! |-----------------------|-----------|
//! | `ESC [ A`..`ESC [ D`  | arrows    |
//! | `ESC [ 1 ~`, `ESC [ 7 ~`, `ESC [ H`, `ESC O H` | Home |
//! | `ESC [ 4 ~`, `ESC [ 8 ~`, `ESC [ F`, `ESC O F` | End  |
//! | `ESC [ 3 ~`           | Delete    |
//! | `ESC [ 5 ~`           | Page Up   |
//! | `ESC [ 6 ~`           | Page Down |
//!
//! Anything else after the escape byte, including nothing at all, is
//! reported as a lone [`Key::Escape`].

mod source;

pub use source::{ByteSource, ReaderSource, TtySource, DEFAULT_ESCAPE_TIMEOUT_MS};

use std::io;

const ESC: u8 = 0x1b;

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A literal byte, including control-key combinations
    Char(u8),

    // Cursor keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Delete,

    /// Escape on its own, or a sequence we do not understand
    Escape,
}

/// The byte a terminal sends for `key` typed with Ctrl held
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1f
}

/// Block until one key can be decoded from `source`
///
/// Only a failure on the first byte is an error. Failures while reading the
/// rest of an escape sequence just end the sequence early.
pub fn read_key<S: ByteSource>(source: &mut S) -> io::Result<Key> {
    let byte = source.read_byte()?;
    if byte != ESC {
        return Ok(Key::Char(byte));
    }

    Ok(decode_escape(source))
}

/// Decode what follows an escape byte
fn decode_escape<S: ByteSource>(source: &mut S) -> Key {
    let mut next = || source.try_read_byte().ok().flatten();

    let Some(first) = next() else {
        return Key::Escape;
    };
    let Some(second) = next() else {
        return Key::Escape;
    };

    match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match next() {
            Some(b'~') => tilde_key(digit),
            _ => Key::Escape,
        },
        (b'[', b'A') => Key::Up,
        (b'[', b'B') => Key::Down,
        (b'[', b'C') => Key::Right,
        (b'[', b'D') => Key::Left,
        (b'[' | b'O', b'H') => Key::Home,
        (b'[' | b'O', b'F') => Key::End,
        _ => Key::Escape,
    }
}

/// Map the digit of an `ESC [ n ~` sequence
fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}
