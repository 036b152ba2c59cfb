//! VT100 output sequences
//!
//! Only the handful the viewer emits. These must stay byte-identical.

use std::io::{self, Write};

pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
/// Erase from the cursor to the end of the line (EL 0)
pub const ERASE_LINE: &[u8] = b"\x1b[K";
/// Erase the whole display (ED 2)
pub const ERASE_DISPLAY: &[u8] = b"\x1b[2J";
pub const CRLF: &[u8] = b"\r\n";

/// Append a CUP sequence for a 1-based `row`/`col`
pub fn cursor_position<W: Write>(out: &mut W, row: usize, col: usize) -> io::Result<()> {
    write!(out, "\x1b[{};{}H", row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position() {
        let mut out = Vec::new();
        cursor_position(&mut out, 3, 17).unwrap();
        assert_eq!(out, b"\x1b[3;17H");
    }
}
