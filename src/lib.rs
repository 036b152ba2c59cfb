//! Gilo: a minimal terminal text viewer
//!
//! The viewer takes over a character terminal, shows the first line of a
//! file (or a welcome banner) and lets the user move a cursor around the
//! viewport until Ctrl-Q.
//!
//! - `terminal`: raw mode session, window size, restoration on every exit
//! - `input`: byte sources and escape-sequence key decoding
//! - `document`: the loaded text as rows
//! - `render`: frame composition and output
//! - `editor`: cursor state and the render/read/dispatch loop
//! - `app`: configuration and logging

pub mod app;
pub mod document;
pub mod editor;
pub mod error;
pub mod input;
pub mod render;
pub mod terminal;

pub use document::{Document, Row};
pub use editor::{Editor, ViewState};
pub use error::{Error, Result};
pub use input::Key;
