use std::{
    collections::VecDeque,
    io::Write,
    sync::Mutex,
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

const HISTORY_LENGTH: usize = 100;

static HISTORY: Mutex<VecDeque<Entry>> = Mutex::new(VecDeque::new());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    pub level: Level,
    pub message: String,
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}

#[must_use]
pub fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// The most recent entries, newest first.
#[must_use]
pub fn entries() -> Vec<Entry> {
    HISTORY
        .lock()
        .map(|history| history.iter().cloned().collect())
        .unwrap_or_default()
}

fn record(entry: Entry) {
    if let Ok(mut history) = HISTORY.lock() {
        history.push_front(entry);
        history.truncate(HISTORY_LENGTH);
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = Entry {
                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            };
            let _ = writeln!(
                std::io::stderr(),
                "{} {:<5} {}",
                entry.time,
                entry.level,
                entry.message
            );
            self::record(entry);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
