/// OpenGL debug output - forwards driver messages to the engine logger
///
/// Installed by `OpenGLDevice` when `RendererConfig::enable_validation` is set
/// and the crate is built with the `opengl-debug-output` feature. Messages are
/// counted per severity so an application can print a summary at shutdown.

use std::sync::atomic::{AtomicU32, Ordering};
use orbit_3d_engine::orbit3d::{Engine, log::LogSeverity};

/// Global debug statistics (the callback has no user data)
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Snapshot of the forwarded message counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlDebugStats {
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
    pub notifications: u32,
}

impl GlDebugStats {
    pub fn total(&self) -> u32 {
        self.errors + self.warnings + self.info + self.notifications
    }
}

struct DebugStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
    notifications: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
            notifications: AtomicU32::new(0),
        }
    }

    fn record(&self, severity: LogSeverity) {
        let counter = match severity {
            LogSeverity::Error => &self.errors,
            LogSeverity::Warn => &self.warnings,
            LogSeverity::Info => &self.info,
            LogSeverity::Debug | LogSeverity::Trace => &self.notifications,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> GlDebugStats {
        GlDebugStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
        self.info.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
    }
}

/// Counts of driver messages forwarded so far
pub fn debug_stats() -> GlDebugStats {
    DEBUG_STATS.snapshot()
}

pub fn reset_debug_stats() {
    DEBUG_STATS.reset();
}

/// Engine severity of a `GL_DEBUG_SEVERITY_*` value
pub(crate) fn log_severity(severity: u32) -> LogSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        _ => LogSeverity::Trace,
    }
}

fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third party",
        glow::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    }
}

fn type_name(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        glow::DEBUG_TYPE_MARKER => "marker",
        _ => "other",
    }
}

/// Debug callback body: log the message and count it
pub(crate) fn forward_message(source: u32, message_type: u32, id: u32, severity: u32, message: &str) {
    let severity = log_severity(severity);
    DEBUG_STATS.record(severity);
    Engine::log(
        severity,
        "orbit3d::opengl::debug",
        format!(
            "[{} / {} #{}] {}",
            source_name(source), type_name(message_type), id, message.trim_end()
        ),
    );
}

/// Enable synchronous debug output on `gl`
///
/// Must run before the context is shared: the callback is registered through
/// `&mut glow::Context`.
#[cfg(feature = "opengl-debug-output")]
pub(crate) fn install(gl: &mut glow::Context) -> bool {
    use glow::HasContext;

    if !gl.supports_debug() {
        orbit_3d_engine::engine_warn!("orbit3d::opengl", "Debug output requested but KHR_debug is unavailable");
        return false;
    }
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(forward_message);
    }
    true
}

#[cfg(test)]
#[path = "gl_debug_tests.rs"]
mod tests;
