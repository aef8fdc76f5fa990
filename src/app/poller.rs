use crate::core::coordinator::RefreshCoordinator;
use crate::domain::model::Snapshot;
use crate::domain::ports::{ConfigProvider, RecordSource};
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Timer-driven refresh loop around a shared coordinator.
///
/// The first refresh fires immediately. A failed tick is only reported; the
/// next attempt waits for the next tick.
pub struct Poller<S: RecordSource> {
    coordinator: Arc<RefreshCoordinator<S>>,
    interval: Duration,
    max_ticks: Option<u64>,
}

impl<S: RecordSource> Poller<S> {
    pub fn new(coordinator: Arc<RefreshCoordinator<S>>, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
            max_ticks: None,
        }
    }

    /// Uses the configured refresh interval.
    pub fn from_config<C: ConfigProvider>(
        coordinator: Arc<RefreshCoordinator<S>>,
        config: &C,
    ) -> Self {
        Self::new(coordinator, config.refresh_interval())
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Polls until `shutdown` resolves or `max_ticks` attempts were made.
    /// Returns the number of attempts.
    pub async fn run<F, R>(&self, shutdown: F, mut report: R) -> u64
    where
        F: Future<Output = ()>,
        R: FnMut(u64, &Result<Arc<Snapshot>>),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut ticks = 0u64;
        tracing::info!("Polling every {:?}", self.interval);

        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                tracing::info!("Reached {} refresh attempts, stopping", ticks);
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping poller");
                    break;
                }
                _ = ticker.tick() => {}
            }

            ticks += 1;
            let outcome = self.coordinator.refresh().await;
            if let Err(e) = &outcome {
                tracing::warn!("Tick {} failed: {}", ticks, e);
            }
            report(ticks, &outcome);
        }

        ticks
    }
}
