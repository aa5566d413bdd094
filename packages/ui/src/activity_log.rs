//! In-app event log shown in the [`crate::ActivityLogPanel`].
//!
//! Pages record fetch failures and completed writes here so the user sees
//! what happened without opening the browser console. Every entry is also
//! emitted as a `tracing` event.

use dioxus::prelude::*;

/// Oldest entries are dropped past this many.
const MAX_ENTRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn class(&self) -> &'static str {
        match self {
            LogLevel::Info => "activity-log-entry info",
            LogLevel::Success => "activity-log-entry success",
            LogLevel::Warning => "activity-log-entry warning",
            LogLevel::Error => "activity-log-entry error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "OK",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.level == LogLevel::Error)
            .count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Append to the shared log and forward to `tracing`.
pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
    log.write().push(level, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
