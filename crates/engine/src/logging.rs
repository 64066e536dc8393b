//! Logger setup.
//!
//! The terminal viewer owns the screen, so its records go to a file; the
//! exporter logs to stderr next to its regular output.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target, WriteStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global logger. `RUST_LOG` selects the level (default `info`).
pub fn init_logging(target: LogTarget) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
            builder.write_style(WriteStyle::Never);
        }
    }

    builder.try_init().context("logger already initialized")?;
    Ok(())
}
