//! Pluggable logger для simulation core
//!
//! Ядро не знает про engine log / debug overlay: host layer ставит свой
//! `LogPrinter` через `set_logger`, headless app и тесты используют
//! `ConsoleLogger` или `BufferLogger`.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard};

// Глобальный printer (None = логи молча отбрасываются)
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Poisoned mutex не должен ронять симуляцию: берём данные как есть.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *lock(&LOGGER) = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *lock(&LOGGER_LEVEL) = level;
}

pub fn log_level() -> LogLevel {
    *lock(&LOGGER_LEVEL)
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = lock(&LOGGER);
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // timestamp добавляем здесь, printer получает готовую строку
    if let Some(logger) = lock(&LOGGER).as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// stdout printer (headless binary, integration tests)
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Printer который копит строки в памяти (host overlay, assertions)
#[derive(Clone, Default)]
pub struct BufferLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Забрать накопленные строки (буфер очищается)
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.lines))
    }
}

impl LogPrinter for BufferLogger {
    fn log(&self, level: LogLevel, message: &str) {
        lock(&self.lines).push(format!("[{}] {}", level.as_str(), message));
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }

    #[test]
    fn test_buffer_logger_collects_lines() {
        let logger = BufferLogger::new();
        logger.log(LogLevel::Info, "parry window closed");
        logger.log(LogLevel::Error, "missing clip");

        let lines = logger.drain();
        assert_eq!(lines, vec!["[INFO] parry window closed", "[ERROR] missing clip"]);
        assert!(logger.drain().is_empty());
    }
}
