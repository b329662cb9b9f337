//! Diagnostic logging for lyric-atlas.
//!
//! Routes every `log::info!()`, `log::warn!()` etc. from all workspace crates
//! to stderr, and mirrors them to a debug log file when one can be opened:
//! /tmp/lyric_atlas_debug.log on Unix/macOS, %TEMP%\lyric_atlas_debug.log on
//! Windows.
//!
//! The level is picked in this order:
//! 1. `--log-level` on the command line
//! 2. `RUST_LOG` (a bare level name such as `debug`)
//! 3. `log_level` from the config file, applied after the config is loaded

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Where the bridge writes
struct DebugLogger {
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let log_path = log_file_path();
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&log_path)
            .ok();

        let mut logger = DebugLogger { file };
        logger.write_file(&format!(
            "\n{}\nlyric-atlas debug session started at {}\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            "=".repeat(80)
        ));
        logger
    }

    fn write_file(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_line(&mut self, line: &str) {
        let _ = std::io::stderr().write_all(line.as_bytes());
        self.write_file(line);
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();
static BRIDGE: LogBridge = LogBridge;

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Path of the debug log file
pub fn log_file_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/lyric_atlas_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("lyric_atlas_debug.log")
    }
}

/// Render one record the way it appears in the log.
pub fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    let level_str = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!("[{}] [{}] [{}] {}\n", timestamp, level_str, target, msg)
}

/// `log` facade backend writing through [`DebugLogger`]
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        get_logger().lock().write_line(&line);
    }

    fn flush(&self) {
        if let Some(ref mut file) = get_logger().lock().file {
            let _ = file.flush();
        }
    }
}

/// Level from `RUST_LOG`, when it holds a plain level name.
fn env_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    value.trim().parse::<LevelFilter>().ok()
}

/// Install the bridge as the global logger.
///
/// `cli_level` wins over `RUST_LOG`. Returns true when either of them fixed
/// the level, in which case [`apply_config_level`] leaves it alone.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) -> bool {
    let explicit = cli_level.or_else(env_level);
    if log::set_logger(&BRIDGE).is_err() {
        // Already installed (tests, repeated init)
        return explicit.is_some();
    }
    log::set_max_level(explicit.unwrap_or(LevelFilter::Warn));
    explicit.is_some()
}

/// Apply the config file's level unless the CLI or environment already did.
pub fn apply_config_level(level: LevelFilter, explicit: bool) {
    if !explicit {
        log::set_max_level(level);
    }
}
