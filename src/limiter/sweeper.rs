//! Periodic eviction of expired rate records.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::RateLimiter;

/// Background task sweeping a set of limiters on a fixed interval.
///
/// Nothing runs until [`Sweeper::start`] is called, and the task lives until
/// [`Sweeper::stop`].
#[derive(Debug)]
pub struct Sweeper {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn the sweep task on the current tokio runtime.
    #[must_use]
    pub fn start(limiters: Vec<Arc<RateLimiter>>, every: Duration) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        info!(
            interval_secs = every.as_secs(),
            limiters = limiters.len(),
            "Starting rate limit sweeper"
        );

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        for limiter in &limiters {
                            let removed = limiter.sweep();
                            if removed > 0 {
                                debug!(
                                    limiter = limiter.name(),
                                    removed,
                                    remaining = limiter.tracked(),
                                    "Swept expired rate records"
                                );
                            }
                        }
                    }
                }
            }
        });

        Self { token, handle }
    }

    /// Cancel the task and wait for it to finish.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Rate limit sweeper ended abnormally");
        }
        info!("Rate limit sweeper stopped");
    }
}
