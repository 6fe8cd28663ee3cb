//! Follow-up runner: spawns tracked background tasks with bounded retry.
//!
//! Tasks are in-process only. A follow-up that is still retrying when the process exits is
//! lost; [`FollowUpRunner::drain`] gives in-flight work a bounded window at shutdown.

use std::future::Future;
use std::time::Duration;

use filedrop_core::{AppError, FileId};
use tokio::time::sleep;
use tokio_util::task::TaskTracker;

/// Upper bound on the delay between two attempts of the same follow-up.
pub const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Computes the delay before retry number `retry` (1-based): `base * 2^(retry - 1)`, capped.
#[inline]
pub(crate) fn compute_retry_backoff(retry: u32, base: Duration) -> Duration {
    let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_RETRY_BACKOFF)
}

#[derive(Clone, Debug)]
pub struct FollowUpConfig {
    /// Extra attempts after the first failure. 0 = fire once.
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Clone)]
pub struct FollowUpRunner {
    tracker: TaskTracker,
    config: FollowUpConfig,
}

impl FollowUpRunner {
    pub fn new(config: FollowUpConfig) -> Self {
        Self {
            tracker: TaskTracker::new(),
            config,
        }
    }

    /// Spawn `operation`, retrying failed attempts up to `max_retries` times.
    ///
    /// Only for idempotent operations. Failures are logged; nothing is reported back to the
    /// caller.
    pub fn spawn_with_retry<F, Fut>(&self, action: &'static str, file_id: FileId, operation: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        self.spawn_attempts(action, file_id, self.config.max_retries, operation);
    }

    /// Spawn `operation` for a single attempt, whatever `max_retries` says.
    ///
    /// For dispatches that must not be repeated: a failed attempt may still have been
    /// delivered.
    pub fn spawn_once<F, Fut>(&self, action: &'static str, file_id: FileId, operation: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        self.spawn_attempts(action, file_id, 0, operation);
    }

    fn spawn_attempts<F, Fut>(
        &self,
        action: &'static str,
        file_id: FileId,
        max_retries: u32,
        operation: F,
    ) where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        let base_backoff = self.config.base_backoff;

        self.tracker.spawn(async move {
            let mut attempt: u32 = 0;
            loop {
                match operation().await {
                    Ok(()) => {
                        tracing::debug!(action, file_id = %file_id, attempt, "Follow-up completed");
                        return;
                    }
                    Err(e) if attempt < max_retries => {
                        attempt += 1;
                        let delay = compute_retry_backoff(attempt, base_backoff);
                        tracing::warn!(
                            action,
                            file_id = %file_id,
                            error = %e,
                            attempt,
                            retry_in_ms = delay.as_millis() as u64,
                            "Follow-up failed, retrying"
                        );
                        sleep(delay).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            action,
                            file_id = %file_id,
                            error = %e,
                            error_type = e.error_type(),
                            attempts = attempt + 1,
                            "Follow-up failed, giving up"
                        );
                        return;
                    }
                }
            }
        });
    }

    /// Spawn a one-shot task that handles its own errors.
    pub fn spawn<Fut>(&self, task: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(task);
    }

    /// Number of follow-ups currently running or waiting to retry.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for in-flight follow-ups, up to `timeout`. Returns `false` on timeout.
    ///
    /// The runner stays usable afterwards.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();

        if !finished {
            tracing::warn!(
                in_flight = self.tracker.len(),
                "Follow-ups still running after drain timeout"
            );
        }
        finished
    }
}

impl Default for FollowUpRunner {
    fn default() -> Self {
        Self::new(FollowUpConfig::default())
    }
}
