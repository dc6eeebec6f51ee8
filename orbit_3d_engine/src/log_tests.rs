//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry, DefaultLogger formatting and filtering.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "orbit3d::Test".to_string(),
        message: "something happened".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_clone_keeps_location() {
    let entry1 = entry(LogSeverity::Error, Some("opengl.rs"), Some(42));
    let entry2 = entry1.clone();

    assert_eq!(entry2.severity, LogSeverity::Error);
    assert_eq!(entry2.source, "orbit3d::Test");
    assert_eq!(entry2.file, Some("opengl.rs"));
    assert_eq!(entry2.line, Some(42));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity() {
    assert_eq!(DefaultLogger::new().min_severity(), LogSeverity::Debug);
    assert_eq!(DefaultLogger::default().min_severity(), LogSeverity::Debug);
    assert_eq!(
        DefaultLogger::with_min_severity(LogSeverity::Warn).min_severity(),
        LogSeverity::Warn
    );
}

#[test]
fn test_format_entry_without_location() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("INFO"));
    assert!(line.contains("orbit3d::Test"));
    assert!(line.ends_with("something happened"));
}

#[test]
fn test_format_entry_with_location() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Error, Some("shader.rs"), Some(7)));
    assert!(line.contains("ERROR"));
    assert!(line.ends_with("(shader.rs:7)"));
}

#[test]
fn test_format_entry_timestamp_shape() {
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Debug, None, None));
    // [YYYY-MM-DD HH:MM:SS.mmm]
    let closing = line.find(']').unwrap();
    assert_eq!(closing, 24);
    assert_eq!(&line[5..6], "-");
    assert_eq!(&line[20..21], ".");
}

#[test]
fn test_default_logger_accepts_all_severities() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));
    logger.log(&entry(LogSeverity::Error, Some("log_tests.rs"), Some(1)));
}

#[test]
fn test_logger_trait_object() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger::with_min_severity(LogSeverity::Error));
    // Filtered out, must not panic
    logger.log(&entry(LogSeverity::Debug, None, None));
}
