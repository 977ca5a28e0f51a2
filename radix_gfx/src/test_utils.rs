//! Shared helpers for unit tests

use std::sync::{Arc, Mutex};
use crate::radix::Engine;
use crate::radix::log::{Logger, LogEntry, LogSeverity};

/// Logger that captures log entries for verification
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

/// Install a capturing logger and return the shared entry buffer
///
/// Callers must be `#[serial]` and should call `Engine::reset_logger()` when done.
pub fn capture_logs() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

/// Messages captured at exactly `severity`
pub fn messages_at(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}

/// Fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let dir = std::env::temp_dir().join(format!(
        "radix_gfx_{}_{}_{}",
        std::process::id(),
        name,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a PNG with the given channel count and uniform pixel value
pub fn write_png(path: &std::path::Path, width: u32, height: u32, pixel: &[u8]) {
    let data: Vec<u8> = (0..width * height).flat_map(|_| pixel.iter().copied()).collect();
    let color = match pixel.len() {
        1 => image::ExtendedColorType::L8,
        2 => image::ExtendedColorType::La8,
        3 => image::ExtendedColorType::Rgb8,
        _ => image::ExtendedColorType::Rgba8,
    };
    image::save_buffer(path, &data, width, height, color).unwrap();
}
