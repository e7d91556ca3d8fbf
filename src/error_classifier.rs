use crate::backend::error::BackendError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Maps backend failures to the level they are reported at.
#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_backend_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Non-critical: rate limiting
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            // Temporary server issues, e.g. the database behind Flask is down
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: the backend wants a login session we don't have
            BackendError::Http { status, .. } if *status == 401 => LogLevel::Error,
            BackendError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Payload no longer matches what we understand
            BackendError::Decode(_) => LogLevel::Error,

            // Server refused the command (e.g. invalid toggle target)
            BackendError::Rejected(_) => LogLevel::Warn,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
