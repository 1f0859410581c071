//! Process-wide error channel for fatal resolution failures.

use tracing::error;

/// Receives the message of a fatal resolution failure.
///
/// A resolver reports at most once per resolution, and only when the
/// continuation will not run.
pub trait ErrorReporter: Send + Sync {
    /// Report a fatal error message.
    fn report(&self, message: &str);
}

impl<F> ErrorReporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Default reporter: logs the message at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, message: &str) {
        error!(target: "config_overlay", "{}", message);
    }
}
