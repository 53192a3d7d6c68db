//! Log capture for unit tests

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Handle on the records logged by every test in this process
pub struct CapturedLogs;

impl CapturedLogs {
    /// Messages logged at warning level so far
    pub fn warnings(&self) -> Vec<String> {
        LOGGER
            .records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(level, _)| *level == Level::Warn)
                    .map(|(_, msg)| msg.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Install the capturing logger (once per process)
pub fn capture_logs() -> CapturedLogs {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    CapturedLogs
}
