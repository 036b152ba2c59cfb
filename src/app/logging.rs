//! Logging setup
//!
//! The viewer owns the screen while it runs, so anything written to
//! standard error lands in the middle of a frame. Point `log_file` at a
//! file to get useful logs; without it only the configured level (errors by
//! default) reaches standard error. Lowering the level through `RUST_LOG`
//! without a `log_file` mixes log lines into the frames.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::Config;

/// Build the filter: `RUST_LOG` wins over the configured directive
fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Install the global tracing subscriber
pub fn init_logging(config: &Config) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter(config))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        },
        None => {
            tracing_subscriber::registry()
                .with(filter(config))
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        },
    }
    Ok(())
}
