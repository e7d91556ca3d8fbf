//! Verbosity of the activity log and the headless console
//!
//! `RUST_LOG` sets how much worker chatter is shown. A directive aimed at this
//! crate (`jemuran=debug` or `jemuran_dashboard=debug`) takes precedence over a
//! bare level, and directives for other crates are ignored. The value is read
//! once per process.

pub use crate::error_classifier::LogLevel;
use log::{Level, LevelFilter};
use std::str::FromStr;
use std::sync::OnceLock;

const CRATE_TARGETS: [&str; 2] = ["jemuran", "jemuran_dashboard"];

/// Used when `RUST_LOG` is unset or names no usable level.
const DEFAULT_VERBOSITY: LevelFilter = LevelFilter::Info;

/// Verbosity from the process environment.
pub fn verbosity() -> LevelFilter {
    static VERBOSITY: OnceLock<LevelFilter> = OnceLock::new();
    *VERBOSITY.get_or_init(|| parse_verbosity(std::env::var("RUST_LOG").ok().as_deref()))
}

pub fn parse_verbosity(rust_log: Option<&str>) -> LevelFilter {
    let Some(rust_log) = rust_log else {
        return DEFAULT_VERBOSITY;
    };

    let mut bare = None;
    for directive in rust_log.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if CRATE_TARGETS.contains(&target.trim()) => {
                if let Ok(filter) = LevelFilter::from_str(level.trim()) {
                    return filter;
                }
            }
            Some(_) => {}
            None if bare.is_none() => bare = LevelFilter::from_str(directive).ok(),
            None => {}
        }
    }
    bare.unwrap_or(DEFAULT_VERBOSITY)
}

fn as_log_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::Trace,
        LogLevel::Debug => Level::Debug,
        LogLevel::Info => Level::Info,
        LogLevel::Warn => Level::Warn,
        LogLevel::Error => Level::Error,
    }
}

pub fn is_visible(level: LogLevel, verbosity: LevelFilter) -> bool {
    as_log_level(level) <= verbosity
}

/// Whether an event at `level` is shown under the environment's verbosity.
pub fn is_visible_with_env(level: LogLevel) -> bool {
    is_visible(level, verbosity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verbosity_defaults_to_info() {
        assert_eq!(parse_verbosity(None), LevelFilter::Info);
        assert_eq!(parse_verbosity(Some("")), LevelFilter::Info);
        assert_eq!(parse_verbosity(Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn test_parse_verbosity_bare_levels() {
        assert_eq!(parse_verbosity(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_verbosity(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(parse_verbosity(Some("off")), LevelFilter::Off);
    }

    #[test]
    // Our own directive beats a bare level; other crates' directives never apply.
    fn test_parse_verbosity_prefers_crate_directive() {
        assert_eq!(
            parse_verbosity(Some("warn,jemuran=trace")),
            LevelFilter::Trace
        );
        assert_eq!(
            parse_verbosity(Some("jemuran_dashboard=error,debug")),
            LevelFilter::Error
        );
        assert_eq!(parse_verbosity(Some("reqwest=trace")), LevelFilter::Info);
        assert_eq!(
            parse_verbosity(Some("reqwest=trace,warn")),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_is_visible() {
        assert!(is_visible(LogLevel::Error, LevelFilter::Debug));
        assert!(is_visible(LogLevel::Warn, LevelFilter::Warn));
        assert!(is_visible(LogLevel::Trace, LevelFilter::Trace));
        assert!(!is_visible(LogLevel::Debug, LevelFilter::Info));
        assert!(!is_visible(LogLevel::Error, LevelFilter::Off));
    }
}
