//! Document store
//!
//! A document is the text being viewed, held as rows of raw bytes in file
//! order. It is loaded once at startup and never changes afterwards.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Error type for document loading
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How much of a file to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Keep only the first line
    #[default]
    FirstLine,
    /// Keep every line
    AllLines,
}

/// One line of text without its line terminator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    /// Create a row, stripping any trailing `\r` and `\n` bytes
    pub fn new(mut chars: Vec<u8>) -> Self {
        while matches!(chars.last(), Some(b'\n' | b'\r')) {
            chars.pop();
        }
        Self { chars }
    }

    /// Row content
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the row has no content
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// An ordered, immutable sequence of rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// A document with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the document for an optional path
    ///
    /// No path gives an empty document. A path that cannot be opened or read
    /// is an error: the caller asked for that file specifically.
    pub fn load(path: Option<&Path>, mode: LoadMode) -> Result<Self, DocumentError> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };

        let file = File::open(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let document =
            Self::from_reader(BufReader::new(file), mode).map_err(|source| DocumentError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "loaded {} row(s) from {}",
            document.num_rows(),
            path.display()
        );
        Ok(document)
    }

    /// Read rows from any buffered reader
    pub fn from_reader<R: BufRead>(mut reader: R, mode: LoadMode) -> io::Result<Self> {
        let mut rows = Vec::new();

        loop {
            let mut line = Vec::new();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            rows.push(Row::new(line));

            if mode == LoadMode::FirstLine {
                break;
            }
        }

        Ok(Self { rows })
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the document has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, if there is one
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl FromIterator<Row> for Document {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
