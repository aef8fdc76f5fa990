use crate::core::standings;
use crate::domain::model::Snapshot;
use crate::domain::ports::RecordSource;
use crate::utils::error::{LeaderboardError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No refresh has succeeded yet.
    Uninitialized,
    /// A snapshot is published.
    Live,
}

/// Owns the last published standings and sequences refreshes against a
/// record source.
///
/// One instance per process; share it behind an `Arc`. Refreshes are
/// serialized so every build diffs against the snapshot published right
/// before it. Readers get `Arc<Snapshot>` handles and never block on a
/// refresh in flight.
pub struct RefreshCoordinator<S: RecordSource> {
    source: S,
    refresh_gate: Mutex<()>,
    published: watch::Sender<Option<Arc<Snapshot>>>,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

impl<S: RecordSource> RefreshCoordinator<S> {
    pub fn new(source: S) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            source,
            refresh_gate: Mutex::new(()),
            published,
            refreshes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches from the owned source, rebuilds, and publishes.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        self.refresh_from(&self.source).await
    }

    /// Same as [`refresh`](Self::refresh) with a caller-supplied source.
    ///
    /// On any failure the published snapshot is left untouched and the cause
    /// comes back wrapped in `RefreshFailed`. No retries here.
    pub async fn refresh_from<F>(&self, source: &F) -> Result<Arc<Snapshot>>
    where
        F: RecordSource + ?Sized,
    {
        let _gate = self.refresh_gate.lock().await;
        let previous = self.latest();

        tracing::debug!("Fetching team records from {}", source.describe());
        let records = match source.fetch_records().await {
            Ok(records) => records,
            Err(e) => return Err(self.record_failure(e.into())),
        };
        tracing::debug!("Fetched {} team records", records.len());

        let snapshot = match standings::build(&records, previous.as_deref()) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => return Err(self.record_failure(e)),
        };

        self.published.send_replace(Some(Arc::clone(&snapshot)));
        let total = self.refreshes.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::info!(
            "Published standings generation {} ({} teams, {} refreshes so far)",
            snapshot.generation,
            snapshot.len(),
            total
        );

        Ok(snapshot)
    }

    /// Latest published snapshot, `None` before the first successful refresh.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.published.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.published.subscribe()
    }

    pub fn state(&self) -> CoordinatorState {
        if self.published.borrow().is_some() {
            CoordinatorState::Live
        } else {
            CoordinatorState::Uninitialized
        }
    }

    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    fn record_failure(&self, cause: LeaderboardError) -> LeaderboardError {
        self.failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            "Refresh failed, keeping previous standings: {} (state: {:?})",
            cause,
            self.state()
        );
        LeaderboardError::refresh_failed(cause)
    }
}
