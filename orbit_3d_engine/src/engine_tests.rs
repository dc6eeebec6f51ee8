//! Unit tests for the engine logging hub
//!
//! LOGGER is a global shared across all tests: every test touching it is
//! marked #[serial].

use crate::orbit3d::Engine;
use crate::log::{CaptureLogger, LogSeverity};
use serial_test::serial;

#[test]
#[serial]
fn test_set_logger_receives_entries() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());

    Engine::log(LogSeverity::Info, "orbit3d::EngineTest", "hello".to_string());

    let entries = capture.entries_from("orbit3d::EngineTest");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].message, "hello");
    assert!(entries[0].file.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());

    Engine::log_detailed(
        LogSeverity::Error,
        "orbit3d::EngineTest",
        "boom".to_string(),
        "engine_tests.rs",
        99,
    );

    let entries = capture.entries_from("orbit3d::EngineTest");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file, Some("engine_tests.rs"));
    assert_eq!(entries[0].line, Some(99));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());

    crate::engine_trace!("orbit3d::MacroTest", "t {}", 1);
    crate::engine_debug!("orbit3d::MacroTest", "d {}", 2);
    crate::engine_info!("orbit3d::MacroTest", "i {}", 3);
    crate::engine_warn!("orbit3d::MacroTest", "w {}", 4);
    crate::engine_error!("orbit3d::MacroTest", "e {}", 5);

    let entries = capture.entries_from("orbit3d::MacroTest");
    let severities: Vec<LogSeverity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );
    assert_eq!(entries[4].message, "e 5");
    assert!(entries[4].file.is_some());
    assert!(entries[3].file.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "orbit3d::ResetTest", "after reset".to_string());

    assert!(capture.entries_from("orbit3d::ResetTest").is_empty());
}
