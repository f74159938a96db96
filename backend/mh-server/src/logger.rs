use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Arguments;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
pub fn initialize(
    log_level: mh_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let dispatch = match log_file {
        Some(ref log_path) => file_dispatch(log_path)?,
        None if colored => colored_dispatch(),
        None => plain_dispatch().chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

/// Render one record as `[date - LEVEL] message [file:line]`
pub fn format_line(level: impl std::fmt::Display, message: &Arguments, record: &Record) -> String {
    format!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    )
}

fn write_line(out: FormatCallback, line: String) {
    out.finish(format_args!("{line}"))
}

// File output (no colors, plain format), parent directory created on demand
pub(crate) fn file_dispatch(log_path: &Path) -> ServerErrorResult<Dispatch> {
    let open = || {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
    };

    let file = open().map_err(|source| ServerError::LogFile {
        path: log_path.display().to_string(),
        source,
    })?;

    Ok(plain_dispatch().chain(file))
}

fn colored_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .format(move |out, message, record| {
            let line = format_line(colors.color(record.level()), message, record);
            write_line(out, line)
        })
        .chain(std::io::stdout())
}

// Plain output for non-TTY (systemd, docker logs)
fn plain_dispatch() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        let line = format_line(record.level(), message, record);
        write_line(out, line)
    })
}
