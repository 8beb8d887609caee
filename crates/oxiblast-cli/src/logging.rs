use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Maps the `-v` count to a level filter, starting at WARN.
pub fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber.
///
/// Logs go to stderr unless `log_file` is given. The terminal UI owns the
/// screen, so interactive sessions should log to a file.
pub fn init(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = level_filter(verbose);
    let (stderr_layer, file_layer) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (Some(layer), None)
        }
    };
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(level)
        .try_init()
        .context("Failed to initialize logging")?;
    tracing::info!(%level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_filter(0), LevelFilter::WARN);
        assert_eq!(level_filter(1), LevelFilter::INFO);
        assert_eq!(level_filter(2), LevelFilter::DEBUG);
        assert_eq!(level_filter(3), LevelFilter::TRACE);
        assert_eq!(level_filter(9), LevelFilter::TRACE);
    }
}
