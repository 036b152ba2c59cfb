//! Crate-level error type
//!
//! Every fallible boundary has its own error enum; this one collects them
//! for the composition root, which reports the message and exits non-zero.

use std::io;

use crate::document::DocumentError;
use crate::terminal::TerminalError;

/// Any error that ends a viewing session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for viewing sessions
pub type Result<T> = std::result::Result<T, Error>;
