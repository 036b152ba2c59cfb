//! Gilo
//!
//! Usage: `gilo [FILE]`

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use gilo::app::{init_logging, Config};
use gilo::document::Document;
use gilo::editor::Editor;
use gilo::input::TtySource;
use gilo::render::{TtyOutput, VERSION};
use gilo::terminal::{install_restore_handlers, window_size, RawModeGuard, TerminalSnapshot};

use tracing::{debug, error, info};

fn main() -> ExitCode {
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gilo: configuration error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("gilo: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting gilo {}", VERSION);

    // Only the first argument is looked at; it names the file to view
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    match run(&config, path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Without a log file, logs and this message would both land on stderr
            if config.log_file.is_some() {
                error!("Fatal error: {}", e);
            }
            eprintln!("gilo: {}", e);
            ExitCode::FAILURE
        },
    }
}

/// One viewing session; raw mode is over by the time this returns
fn run(config: &Config, path: Option<PathBuf>) -> gilo::Result<()> {
    let document = Document::load(path.as_deref(), config.load_mode())?;

    // Handlers first, so a signal never finds the terminal raw with nothing to restore
    let snapshot = TerminalSnapshot::capture(io::stdin())?;
    install_restore_handlers(io::stdin(), &snapshot)?;
    let guard = RawModeGuard::new(io::stdin())?;

    let size = window_size(io::stdin())?;
    debug!("window size {}x{}", size.cols, size.rows);

    let input = TtySource::new(io::stdin(), config.escape_timeout_ms);
    let output = TtyOutput::new(io::stdout());
    let mut editor = Editor::new(document, size, input, output).with_keymap(config.keymap());
    editor.run()?;

    guard.restore()?;
    Ok(())
}
