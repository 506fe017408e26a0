//! Rolling Logger
//!
//! A time-rotated file logger (`tracing-appender`) with an in-memory circular
//! buffer of the most recent lines. Installs a `tracing` subscriber and bridges
//! the `log` facade, so library code can keep using `log::info!` and friends.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

pub use tracing_appender::rolling::Rotation;

/// Rotation and buffer limits
#[derive(Debug, Clone)]
pub struct RollingConfig {
    /// How often a new file is started
    pub rotation: Rotation,
    /// Log files kept on disk, the active one included
    pub max_files: usize,
    /// Lines kept in the in-memory ring buffer
    pub buffer_lines: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            rotation: Rotation::DAILY,
            max_files: 7,
            buffer_lines: 500,
        }
    }
}

static RECENT: OnceLock<SharedLines> = OnceLock::new();

/// Initialize the global logger with default limits.
///
/// Log files are written to `log_dir` as `{app_name}.{date}.log`. Calling this
/// again after a successful init is a no-op.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

/// Initialize the global logger with explicit limits
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: RollingConfig,
) -> Result<(), String> {
    if RECENT.get().is_some() {
        return Ok(());
    }

    let appender = build_appender(log_dir.as_ref(), app_name, &config)?;
    let writer = RingMakeWriter::new(appender, config.buffer_lines);
    let recent = writer.lines();

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    // A racing init may have won; keep whichever buffer got installed first.
    let _ = RECENT.set(recent);
    Ok(())
}

/// Log an info line through the installed logger
pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

/// Log an error line through the installed logger
pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent lines, oldest first. Empty before init.
pub fn recent_lines() -> Vec<String> {
    RECENT.get().map(SharedLines::snapshot).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    if RECENT.get().is_none() {
        return Err("Logger not initialized".to_string());
    }
    Ok(())
}

fn build_appender(
    dir: &Path,
    app_name: &str,
    config: &RollingConfig,
) -> Result<RollingFileAppender, String> {
    RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(config.max_files.max(1))
        .build(dir)
        .map_err(|e| format!("Failed to open log file: {}", e))
}

/// Timestamps in local time, millisecond precision
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

// ========================
// Ring buffer
// ========================

struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    fn record(&mut self, buf: &[u8]) {
        if self.capacity == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if line.is_empty() {
                continue;
            }
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }
}

#[derive(Clone)]
struct SharedLines(Arc<Mutex<RecentLines>>);

impl SharedLines {
    fn new(capacity: usize) -> Self {
        Self(Arc::new(Mutex::new(RecentLines {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        })))
    }

    fn record(&self, buf: &[u8]) {
        match self.0.lock() {
            Ok(mut recent) => recent.record(buf),
            Err(poisoned) => poisoned.into_inner().record(buf),
        }
    }

    fn snapshot(&self) -> Vec<String> {
        match self.0.lock() {
            Ok(recent) => recent.lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().lines.iter().cloned().collect(),
        }
    }
}

/// Wraps another `MakeWriter`, copying every written line into the ring buffer
struct RingMakeWriter<M> {
    inner: M,
    recent: SharedLines,
}

impl<M> RingMakeWriter<M> {
    fn new(inner: M, capacity: usize) -> Self {
        Self {
            inner,
            recent: SharedLines::new(capacity),
        }
    }

    fn lines(&self) -> SharedLines {
        self.recent.clone()
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for RingMakeWriter<M> {
    type Writer = RingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RingWriter {
            inner: self.inner.make_writer(),
            recent: self.recent.clone(),
        }
    }
}

struct RingWriter<W> {
    inner: W,
    recent: SharedLines,
}

impl<W: Write> Write for RingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.recent.record(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
