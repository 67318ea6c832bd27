//! Logging and timing around a single repository call.

use std::future::Future;
use std::time::Instant;

use tracing::{error, info};

use crate::error::AppResult;

/// Messages emitted around one repository call.
pub(crate) struct OperationLog {
    /// Logged before the call starts.
    pub started: String,
    /// Prefix of the timing log; ` in {elapsed}ms` is appended.
    pub completed: String,
    /// Logged at error level together with the failure.
    pub failed: String,
    /// Whether the timing log is still emitted after a failure.
    pub timing_on_failure: bool,
}

impl OperationLog {
    pub fn new(
        started: impl Into<String>,
        completed: impl Into<String>,
        failed: impl Into<String>,
    ) -> Self {
        Self {
            started: started.into(),
            completed: completed.into(),
            failed: failed.into(),
            timing_on_failure: false,
        }
    }

    pub fn timing_on_failure(mut self) -> Self {
        self.timing_on_failure = true;
        self
    }
}

/// Runs `call`, logging `log.started` before it and the elapsed whole
/// milliseconds after it.
///
/// A failure is logged at error level and handed back unchanged.
pub(crate) async fn run_logged<T, F, Fut>(log: OperationLog, call: F) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    info!("{}", log.started);

    let started_at = Instant::now();
    let result = call().await;
    let elapsed_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(value) => {
            info!(elapsed_ms, "{} in {}ms", log.completed, elapsed_ms);
            Ok(value)
        }
        Err(error) => {
            error!(error = %error, "{}", log.failed);
            if log.timing_on_failure {
                info!(elapsed_ms, "{} in {}ms", log.completed, elapsed_ms);
            }
            Err(error)
        }
    }
}
