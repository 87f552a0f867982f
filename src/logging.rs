//! GC Logging and Tracing
//!
//! Structured event logging for the collector, modeled on the original
//! design's event-sourced tracer: a process-wide logger accumulates
//! [`GcEvent`]s, each gated by a [`LogLevel`], and can render them as
//! either human-readable lines or JSON. `GcConfig::verbose` is the Rust
//! analogue of the original's `DEBUG_TRACE` switch - it raises the
//! default level from `Warn` to `Debug`.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use std::sync::Mutex;

/// Severity of a logged [`GcEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// A structured GC event.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event")]
pub enum GcEvent {
    CycleStart { cycle: u64 },
    PhaseStart { phase: String, cycle: u64 },
    PhaseEnd { phase: String, cycle: u64 },
    CycleEnd { cycle: u64, reclaimed_bytes: usize },
    HeapStats {
        used_bytes: usize,
        total_bytes: usize,
        occupancy: f64,
    },
    AllocationFailure { requested_bytes: usize },
    MarkStats { marked_count: u64 },
    RelocateStats {
        relocated_count: usize,
        bytes_moved: usize,
    },
}

impl GcEvent {
    fn level(&self) -> LogLevel {
        match self {
            GcEvent::AllocationFailure { .. } => LogLevel::Warn,
            GcEvent::CycleStart { .. } | GcEvent::CycleEnd { .. } => LogLevel::Info,
            GcEvent::PhaseStart { .. } | GcEvent::PhaseEnd { .. } | GcEvent::HeapStats { .. } => {
                LogLevel::Debug
            }
            GcEvent::MarkStats { .. } | GcEvent::RelocateStats { .. } => LogLevel::Trace,
        }
    }
}

/// Level implied by [`crate::config::GcConfig::verbose`] - the Rust
/// analogue of the original collector's `DEBUG_TRACE` switch: `false`
/// keeps the default `Warn` level, `true` raises it to `Debug`.
pub fn level_for_verbose(verbose: bool) -> LogLevel {
    if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    }
}

/// Configuration for [`GcLogger`].
#[derive(Debug, Clone)]
pub struct GcLoggerConfig {
    pub level: LogLevel,
    pub json: bool,
    pub timestamps: bool,
}

impl Default for GcLoggerConfig {
    fn default() -> Self {
        GcLoggerConfig {
            level: LogLevel::Warn,
            json: false,
            timestamps: true,
        }
    }
}

/// Accumulates and renders [`GcEvent`]s.
pub struct GcLogger {
    config: GcLoggerConfig,
    events: Vec<(DateTime<Utc>, GcEvent)>,
}

impl GcLogger {
    pub fn new(config: GcLoggerConfig) -> Self {
        GcLogger {
            config,
            events: Vec::new(),
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.config.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    pub fn log(&mut self, event: GcEvent) {
        if event.level() > self.config.level {
            return;
        }
        let now = Utc::now();
        if self.config.json {
            self.output_json(&now, &event);
        } else {
            self.output_human(&now, &event);
        }
        self.events.push((now, event));
    }

    fn output_human(&self, ts: &DateTime<Utc>, event: &GcEvent) {
        if self.config.timestamps {
            log::debug!("[{}] {:?}", ts.to_rfc3339(), event);
        } else {
            log::debug!("{:?}", event);
        }
    }

    fn output_json(&self, ts: &DateTime<Utc>, event: &GcEvent) {
        let payload = serde_json::json!({
            "timestamp": ts.to_rfc3339(),
            "event": event,
        });
        log::debug!("{}", payload);
    }

    pub fn events(&self) -> &[(DateTime<Utc>, GcEvent)] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<GcLogger> = Mutex::new(GcLogger::new(GcLoggerConfig::default()));
}

/// Log an event through the process-wide logger.
pub fn log_event(event: GcEvent) {
    GLOBAL_LOGGER.lock().unwrap().log(event);
}

/// Reconfigure the process-wide logger.
pub fn configure_logger(config: GcLoggerConfig) {
    *GLOBAL_LOGGER.lock().unwrap() = GcLogger::new(config);
}

/// Raise or lower the process-wide logger's level in place, without
/// discarding its accumulated events. Used by
/// [`crate::gc::GarbageCollector::new`] to apply `GcConfig::verbose`.
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOGGER.lock().unwrap().set_level(level);
}

/// Number of events recorded by the process-wide logger so far.
pub fn global_event_count() -> usize {
    GLOBAL_LOGGER.lock().unwrap().event_count()
}
