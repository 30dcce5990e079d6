//! Log sink for the cellglyph binary.
//!
//! Every crate logs through the `log` facade; this module installs the one
//! `log::Log` implementation that writes those records out.
//!
//! Level precedence, highest first:
//! - `--log-level` CLI flag
//! - `RUST_LOG` environment variable
//! - `log_level` from the config file
//!
//! Lines go to stderr, or to `log_file` when the config names one, in the
//! form `[timestamp] [LEVEL] [target] message`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use cellglyph_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

enum Sink {
    Stderr,
    File(File),
}

struct CellglyphLogger {
    level: LevelFilter,
    sink: Mutex<Sink>,
}

impl Log for CellglyphLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(&get_timestamp(), record);
        // Write failures are dropped; there is nowhere left to report them.
        match &mut *self.sink.lock() {
            Sink::Stderr => {
                let _ = std::io::stderr().write_all(line.as_bytes());
            }
            Sink::File(file) => {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        match &mut *self.sink.lock() {
            Sink::Stderr => {
                let _ = std::io::stderr().flush();
            }
            Sink::File(file) => {
                let _ = file.flush();
            }
        }
    }
}

static LOGGER: OnceLock<CellglyphLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_line(timestamp: &str, record: &Record) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}\n",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}

/// Picks the effective level from the CLI flag, `RUST_LOG` and the config.
///
/// `RUST_LOG` may be a bare level or a list of `target=level` directives;
/// the most verbose level named wins. Unparseable values are ignored.
pub fn resolve_level(
    cli: Option<LogLevel>,
    rust_log: Option<&str>,
    config: LogLevel,
) -> LevelFilter {
    if let Some(level) = cli {
        return level.to_level_filter();
    }
    let from_env = rust_log.and_then(|value| {
        value
            .split(',')
            .filter_map(|directive| directive.rsplit('=').next())
            .filter_map(|level| level.parse::<LogLevel>().ok())
            .map(LogLevel::to_level_filter)
            .max()
    });
    from_env.unwrap_or_else(|| config.to_level_filter())
}

/// Installs the logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let sink = match log_file {
        Some(path) => Sink::File(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        None => Sink::Stderr,
    };

    let logger = LOGGER.get_or_init(|| CellglyphLogger {
        level,
        sink: Mutex::new(sink),
    });
    log::set_logger(logger).map_err(|e| anyhow!("logger already installed: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        let level = resolve_level(Some(LogLevel::Warn), Some("trace"), LogLevel::Debug);
        assert_eq!(level, LevelFilter::Warn);
    }

    #[test]
    fn test_rust_log_beats_config() {
        assert_eq!(
            resolve_level(None, Some("info"), LogLevel::Error),
            LevelFilter::Info
        );
        assert_eq!(
            resolve_level(None, Some("cellglyph_fonts=trace,warn"), LogLevel::Off),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_unparseable_rust_log_falls_back_to_config() {
        assert_eq!(
            resolve_level(None, Some("verbose"), LogLevel::Debug),
            LevelFilter::Debug
        );
        assert_eq!(resolve_level(None, None, LogLevel::Off), LevelFilter::Off);
    }

    #[test]
    fn test_format_line() {
        let line = format_line(
            "12.000001",
            &Record::builder()
                .args(format_args!("loaded {} glyphs", 3))
                .level(log::Level::Info)
                .target("cellglyph_fonts::face")
                .build(),
        );
        assert_eq!(
            line,
            "[12.000001] [INFO ] [cellglyph_fonts::face] loaded 3 glyphs\n"
        );
    }
}
