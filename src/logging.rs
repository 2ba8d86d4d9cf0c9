/// Console logging for the planner
///
/// `log!` is informational output that is compiled out of production (release)
/// builds by default. `warn!` and `error!` always emit.
///
/// Informational logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// In the browser the macros write to the devtools console. Native builds
/// (unit tests, benches) write to stderr instead, so the routing core can run
/// without a JS host.
///
/// # Examples
///
/// ```rust
/// use itinerary_planner::logging::log;
///
/// log!("Search #{} issued for {:?}", 3, "paris");
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            $crate::logging::emit($crate::logging::Level::Info, &format!($($arg),+));
        }
    };
}

/// Log a recoverable problem (swallowed failures, dropped input)
#[macro_export]
macro_rules! warn {
    ($($arg:expr),+ $(,)?) => {
        $crate::logging::emit($crate::logging::Level::Warn, &format!($($arg),+))
    };
}

/// Log a failure that is surfaced to the user
#[macro_export]
macro_rules! error {
    ($($arg:expr),+ $(,)?) => {
        $crate::logging::emit($crate::logging::Level::Error, &format!($($arg),+))
    };
}

pub use crate::{error, log, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub fn emit(level: Level, message: &str) {
    let value = wasm_bindgen::JsValue::from_str(message);
    match level {
        Level::Info => web_sys::console::log_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[doc(hidden)]
pub fn emit(level: Level, message: &str) {
    let tag = match level {
        Level::Info => "INFO",
        Level::Warn => "WARN",
        Level::Error => "ERROR",
    };
    eprintln!("[{tag}] {message}");
}
