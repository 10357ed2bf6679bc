//! JSONL file logger for profiling events.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::event::{EventType, ProfileEvent};

/// Directory used by `init()`
pub const DEFAULT_PROFILE_DIR: &str = "data";

/// Global logger instance - must be initialized via init().
static LOGGER: Mutex<Option<ProfileLogger>> = Mutex::new(None);

/// Event counter for log statistics.
static EVENT_COUNT: AtomicU64 = AtomicU64::new(0);

/// The profile logger that writes events to a JSONL file.
struct ProfileLogger {
    writer: BufWriter<File>,
    path: PathBuf,
    log_id: String,
}

impl ProfileLogger {
    /// Create a new logger with a timestamped filename.
    fn new(dir: &Path) -> std::io::Result<Self> {
        let log_id = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let path = dir.join(format!("profile_{}.jsonl", log_id));

        create_dir_all(dir)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::info!("Profiling enabled: writing to {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            log_id,
        })
    }

    fn log(&mut self, event: ProfileEvent) {
        if let Ok(json) = serde_json::to_string(&event) {
            let _ = writeln!(self.writer, "{}", json);
            // Flush every 100 events
            if EVENT_COUNT.load(Ordering::Relaxed) % 100 == 0 {
                let _ = self.writer.flush();
            }
            tracing::trace!(target: "profile", "{}", json);
        }
        EVENT_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Initialize the profiler in the default `data/` directory.
pub fn init() {
    init_in(Path::new(DEFAULT_PROFILE_DIR));
}

/// Initialize the profiler, creating a timestamped log file inside `dir`.
///
/// Returns the log file path, or `None` if the profiler was already running
/// or the file could not be created.
pub fn init_in(dir: &Path) -> Option<PathBuf> {
    let mut guard = LOGGER.lock().ok()?;
    if guard.is_some() {
        tracing::warn!("Profiler already initialized");
        return None;
    }

    match ProfileLogger::new(dir) {
        Ok(logger) => {
            let log_id = logger.log_id.clone();
            let path = logger.path.clone();
            *guard = Some(logger);

            drop(guard); // Release lock before logging
            log_event(EventType::LogStart { log_id });
            Some(path)
        }
        Err(e) => {
            tracing::error!("Failed to initialize profiler: {}", e);
            None
        }
    }
}

/// Shutdown the profiler and flush remaining events.
pub fn shutdown() {
    let total_events = EVENT_COUNT.load(Ordering::Relaxed);

    log_event(EventType::LogEnd { total_events });

    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.flush();
            tracing::info!("Profiling ended: {} events logged", total_events);
        }
        *guard = None;
    }
}

fn write(event: ProfileEvent) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(event);
        }
    }
}

/// Log a profiling event.
pub fn log_event(event_type: EventType) {
    write(ProfileEvent::new(event_type));
}

/// Log a timed scope completion.
pub fn log_timed(name: &str, duration: Duration) {
    write(ProfileEvent::with_duration(
        EventType::TimedScope {
            name: name.to_string(),
        },
        duration,
    ));
}
