//! Logging infrastructure for a11y-keys.
//!
//! Routes every `log::info!()`/`log::debug!()` call in the workspace through a
//! single `log::Log` bridge that writes timestamped lines to stderr:
//!
//! ```text
//! [1730000000.123456] [DEBUG] [a11y_keys_bindings::host] Host 'x-list': ...
//! ```
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied after the config is loaded).

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let mut sink = self.sink.lock();
        // Logging must never take the process down
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Whether the level came from the CLI or `RUST_LOG` and must not be
/// overridden by the config file.
static LEVEL_PINNED: OnceLock<bool> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_line(level: log::Level, target: &str, msg: &str) -> String {
    let level_str = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!("[{}] [{}] [{}] {}\n", get_timestamp(), level_str, target, msg)
}

/// Parse a `RUST_LOG`-style value. Only a bare level is understood.
fn parse_env_level(value: &str) -> Option<log::LevelFilter> {
    value.trim().parse::<log::LevelFilter>().ok()
}

/// Pick the effective level from the CLI flag and the `RUST_LOG` value.
///
/// Returns the level and whether it was explicitly requested.
pub fn resolve_level(
    cli_level: Option<log::LevelFilter>,
    env_value: Option<&str>,
) -> (log::LevelFilter, bool) {
    if let Some(level) = cli_level {
        return (level, true);
    }
    if let Some(level) = env_value.and_then(parse_env_level) {
        return (level, true);
    }
    (log::LevelFilter::Warn, false)
}

/// Install the log bridge. Safe to call more than once; later calls only
/// adjust the level.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_value = std::env::var("RUST_LOG").ok();
    let (level, pinned) = resolve_level(cli_level, env_value.as_deref());
    let _ = LEVEL_PINNED.set(pinned);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        sink: Mutex::new(Box::new(io::stderr())),
    });
    // Err only means a logger is already installed
    let _ = log::set_logger(bridge);
    log::set_max_level(level);
}

/// Apply the config file's level unless the CLI or `RUST_LOG` pinned one.
pub fn apply_config_level(level: log::LevelFilter) {
    if LEVEL_PINNED.get().copied().unwrap_or(false) {
        return;
    }
    log::set_max_level(level);
}
