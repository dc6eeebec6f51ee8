//! Unit tests for debug message forwarding
//!
//! The logger and the statistics are globals: every test is #[serial].

use std::sync::{Arc, Mutex};
use orbit_3d_engine::orbit3d::{
    Engine,
    log::{LogEntry, LogSeverity, Logger},
};
use serial_test::serial;
use super::*;

#[derive(Clone, Default)]
struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for RecordingLogger {
    fn log(&self, entry: &LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

impl RecordingLogger {
    fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }
}

#[test]
fn test_log_severity_mapping() {
    assert_eq!(log_severity(glow::DEBUG_SEVERITY_HIGH), LogSeverity::Error);
    assert_eq!(log_severity(glow::DEBUG_SEVERITY_MEDIUM), LogSeverity::Warn);
    assert_eq!(log_severity(glow::DEBUG_SEVERITY_LOW), LogSeverity::Info);
    assert_eq!(log_severity(glow::DEBUG_SEVERITY_NOTIFICATION), LogSeverity::Trace);
}

#[test]
#[serial]
fn test_forward_message_logs_and_counts() {
    let logger = RecordingLogger::default();
    Engine::set_logger(logger.clone());
    reset_debug_stats();

    forward_message(
        glow::DEBUG_SOURCE_API,
        glow::DEBUG_TYPE_ERROR,
        1281,
        glow::DEBUG_SEVERITY_HIGH,
        "GL_INVALID_VALUE in glTexImage2D\n",
    );
    forward_message(
        glow::DEBUG_SOURCE_SHADER_COMPILER,
        glow::DEBUG_TYPE_PERFORMANCE,
        7,
        glow::DEBUG_SEVERITY_MEDIUM,
        "recompiled",
    );

    let entries = logger.entries();
    Engine::reset_logger();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert_eq!(entries[0].source, "orbit3d::opengl::debug");
    assert_eq!(entries[0].message, "[api / error #1281] GL_INVALID_VALUE in glTexImage2D");
    assert_eq!(entries[1].message, "[shader compiler / performance #7] recompiled");

    let stats = debug_stats();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.total(), 2);
}

#[test]
#[serial]
fn test_reset_debug_stats() {
    let logger = RecordingLogger::default();
    Engine::set_logger(logger);
    forward_message(0, 0, 0, glow::DEBUG_SEVERITY_NOTIFICATION, "note");
    Engine::reset_logger();

    assert!(debug_stats().notifications >= 1);
    reset_debug_stats();
    assert_eq!(debug_stats(), GlDebugStats::default());
}
