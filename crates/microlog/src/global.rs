use std::sync::OnceLock;

use core::fmt::Arguments;

use parking_lot::{Mutex, MutexGuard};

use termcolor::StandardStream;

use compact_str::ToCompactString;

use crate::*;

static LOGGER: OnceLock<Mutex<Logger<StandardStream>>> = OnceLock::new();

#[inline(always)]
fn logger() -> MutexGuard<'static, Logger<StandardStream>> {
    LOGGER
        .get_or_init(|| Mutex::new(Logger::stdio()))
        .lock()
}

/// Creates the global logger now instead of on first use, so the terminal
/// probe and [`ENV_VAR`] are read up front.
pub fn init() {
    LOGGER.get_or_init(|| Mutex::new(Logger::stdio()));
}

#[inline(always)]
pub fn set_output_level(level: Level) {
    logger().set_output_level(level);
}

#[inline(always)]
pub fn output_level() -> Level {
    logger().output_level()
}

#[inline(always)]
pub fn enable_feature(feature: Feature) {
    logger().enable_feature(feature);
}

#[inline(always)]
pub fn disable_feature(feature: Feature) {
    logger().disable_feature(feature);
}

#[inline(always)]
pub fn has_feature(feature: Feature) -> bool {
    logger().has_feature(feature)
}

/// Overrides the output level for `target` and the modules below it.
#[inline(always)]
pub fn set_target_level(target: &str, level: Level) {
    logger().set_target_level(target, level);
}

#[inline(always)]
pub fn clear_target_level(target: &str) {
    logger().clear_target_level(target);
}

/// A snapshot of the global configuration.
#[inline(always)]
pub fn config() -> LogConfig {
    logger().config().clone()
}

/// Logs through the global logger. Prefer the macros, which fill in `target`
/// and discard the result.
///
/// The lock is not held while `args` is formatted, so `Display` and `Debug`
/// impls may log themselves. Their lines come out before this one.
pub fn log(target: &str, severity: Severity, args: Arguments) -> Result<bool> {
    let enabled = logger().enabled(target, severity);
    if !enabled {
        return Ok(false)
    }
    let msg = args.to_compact_string();
    logger().write_line(severity, format_args!("{}", msg))?;
    Ok(true)
}

#[macro_export]
macro_rules! log {
    ($severity:expr, $($arg:tt)+) => {
        {
            let _ = $crate::log(module_path!(), $severity, format_args!($($arg)+));
        }
    };
}

/// Logs a formatted error message to the standard error stream.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Error, $($arg)+)
    };
}

/// Logs a formatted info message to the standard output stream.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Info, $($arg)+)
    };
}

/// Logs a formatted debug message to the standard output stream. Does nothing
/// unless the output level is at least [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Debug, $($arg)+)
    };
}

/// Logs a formatted trace message to the standard output stream. Does nothing
/// unless the output level is [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Trace, $($arg)+)
    };
}
