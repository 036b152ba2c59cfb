//! Editor loop
//!
//! The composition root of a viewing session: draw a frame, wait for one
//! key, apply it, repeat until the quit key arrives.

mod view;

pub use view::{Direction, ViewState};

use std::io::Write;

use crate::document::Document;
use crate::error::Result;
use crate::input::{ctrl_key, read_key, ByteSource, Key};
use crate::render::Renderer;
use crate::terminal::WindowSize;

/// The key that ends the session
pub const QUIT_KEY: u8 = ctrl_key(b'q');

/// What the loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Key handling options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keymap {
    /// Also move with `h`, `j`, `k` and `l`
    pub vi_keys: bool,
}

/// A viewing session over one document
#[derive(Debug)]
pub struct Editor<S: ByteSource, W: Write> {
    view: ViewState,
    document: Document,
    keymap: Keymap,
    input: S,
    renderer: Renderer<W>,
}

impl<S: ByteSource, W: Write> Editor<S, W> {
    /// Create a session drawing into a viewport of `size`
    pub fn new(document: Document, size: WindowSize, input: S, output: W) -> Self {
        Self {
            view: ViewState::new(size),
            document,
            keymap: Keymap::default(),
            input,
            renderer: Renderer::new(output),
        }
    }

    /// Use a different keymap
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Current cursor and viewport
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The document being viewed
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the output stream back
    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }

    /// Run until the quit key
    ///
    /// Failing to read the next key or to write a frame ends the session
    /// with an error; there is nothing sensible to fall back to.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.renderer.draw(&self.view, &self.document)?;

            let key = read_key(&mut self.input)?;
            tracing::trace!("key {:?}", key);

            if self.process_key(key) == Flow::Quit {
                tracing::debug!("quit requested");
                self.renderer.clear()?;
                return Ok(());
            }
        }
    }

    /// Apply one key to the view
    pub fn process_key(&mut self, key: Key) -> Flow {
        match key {
            Key::Char(QUIT_KEY) => return Flow::Quit,
            Key::Left => self.view.step(Direction::Left),
            Key::Right => self.view.step(Direction::Right),
            Key::Up => self.view.step(Direction::Up),
            Key::Down => self.view.step(Direction::Down),
            Key::Home => self.view.line_start(),
            Key::End => self.view.line_end(),
            Key::PageUp => self.view.page(Direction::Up),
            Key::PageDown => self.view.page(Direction::Down),
            Key::Char(c) if self.keymap.vi_keys => {
                if let Some(direction) = vi_direction(c) {
                    self.view.step(direction);
                }
            },
            _ => {},
        }
        Flow::Continue
    }
}

fn vi_direction(c: u8) -> Option<Direction> {
    match c {
        b'h' => Some(Direction::Left),
        b'j' => Some(Direction::Down),
        b'k' => Some(Direction::Up),
        b'l' => Some(Direction::Right),
        _ => None,
    }
}
