//! File-based logging using simplelog.
//!
//! The terminal is in raw mode while the game runs, so log output goes to a
//! file (`<cache dir>/grid-snake/grid-snake.log` unless overridden).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const LOG_DIR_NAME: &str = "grid-snake";
const LOG_FILE_NAME: &str = "grid-snake.log";

/// Returns the default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(LOG_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Parses a `RUST_LOG`-style level name, defaulting to `Info`.
#[must_use]
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs the global file logger, truncating any previous log.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    let file = File::create(path)?;
    WriteLogger::init(level, config, file).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use simplelog::LevelFilter;

    use super::{default_log_path, level_from_env};

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level_from_env(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("warn")), LevelFilter::Warn);
    }

    #[test]
    fn unknown_or_missing_level_defaults_to_info() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("chatty")), LevelFilter::Info);
    }

    #[test]
    fn default_log_path_ends_with_file_name() {
        assert!(default_log_path().ends_with("grid-snake/grid-snake.log"));
    }
}
